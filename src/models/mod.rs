/// Persisted entity models
///
/// These structs map onto the `users` and `items` tables. Ownership of items
/// is recorded only through `Item::owner_id`; the list of a user's items is
/// always derived with a query (see `UserWithItems`).

mod user;
pub use user::{NewUser, User};

mod item;
pub use item::{Item, NewItem};

mod user_with_items;
pub use user_with_items::UserWithItems;
