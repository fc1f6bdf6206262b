/// Repository module
///
/// Data access for the persisted `users` and `items` tables. Every function
/// takes the pool, checks out a connection and returns an `anyhow::Result`.

mod user_repo;
mod item_repo;

// Re-export all repository functions
pub use user_repo::*;
pub use item_repo::*;
