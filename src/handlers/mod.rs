/// Web API Handlers
///
/// One handler per endpoint. Handlers receive already-validated input from the
/// extractors in `crate::extract`, `crate::guards` and `crate::upload`, and
/// return either a serializable value or an `ApiError`.

mod item_handlers;
mod upload_handlers;
mod header_handlers;
mod user_handlers;
mod offer_handlers;
mod unicorn_handlers;

// Re-export all handlers
pub use item_handlers::*;
pub use upload_handlers::*;
pub use header_handlers::*;
pub use user_handlers::*;
pub use offer_handlers::*;
pub use unicorn_handlers::*;
