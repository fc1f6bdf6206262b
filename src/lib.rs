/// Itemshop: request handling, validation and entity mapping over Axum and Diesel
///
/// This library provides the schemas, validating extractors, handlers and the
/// persisted user/item model behind the `itemshop` server.
///
/// ### Modules
///
/// - `config`: Layered configuration (defaults, TOML file, CLI/env)
/// - `db`: Database connection management
/// - `dto`: Request and response schemas with their validation rules
/// - `errors`: The API error taxonomy and its HTTP translation
/// - `extract`, `guards`, `upload`: Per-request extractors
/// - `shape`: Per-field presence and type checks behind the extractors
/// - `handlers`: One handler per endpoint
/// - `models`, `repo`, `schema`: Persisted users and items
///
/// ### Web API
///
/// - `POST /item/`: Create an item by name (201)
/// - `POST /login/`: Form login
/// - `POST /files/`, `POST /uploadfile/`, `POST /files/one/`: Multipart uploads
/// - `GET /items/{item_id}`: Look up an item; `PUT /items/{item_id}`: Replace an item
/// - `GET /unicorns/{name}`: Look up a unicorn (418 for "yolo")
/// - `GET /items/`, `GET /users/`: Common query parameters
/// - `GET /items/one/`: Header-guarded listing
/// - `GET /items/two/`, `GET /items/ads/`, `GET /items/strange/`: Header and cookie echoes
/// - `POST /items/three/`, `GET /items/four/`: Item schema in and out
/// - `POST /offers/`: Offer with nested items
/// - `POST /user/`: Register a user, password stripped from the response

/// Configuration module
pub mod config;

/// Database connection module
pub mod db;

/// Request and response schemas
pub mod dto;

/// Error types
pub mod errors;

/// Validating extractors
pub mod extract;

/// Read-only demo data
pub mod fake_db;

/// Header checks used as route dependencies
pub mod guards;

/// Web API handlers
pub mod handlers;

/// Data models module
pub mod models;

/// Password hashing
pub mod password;

/// Repository module for database operations
pub mod repo;

/// Database schema module
pub mod schema;

/// Per-field presence and type checks
pub mod shape;

/// Multipart bodies
pub mod upload;

#[cfg(test)]
mod test_utils;

use axum::{
    http::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handlers::*;

/// Creates the application router with all routes
///
/// ### Arguments
///
/// * `pool` - The database connection pool, shared with all handlers as state
///
/// ### Returns
///
/// An Axum Router configured with all routes, request tracing and CORS
pub fn create_app(pool: Arc<db::DbPool>) -> Router {
    Router::new()
        // Query, form and multipart input
        .route("/item/", post(create_item_handler))
        .route("/login/", post(login_handler))
        .route("/files/", post(create_file_handler))
        .route("/files/one/", post(create_file_one_handler))
        .route("/uploadfile/", post(create_upload_file_handler))
        // Path lookups and the item schema
        .route("/items/", get(list_items_handler))
        .route("/items/{item_id}", get(get_item_handler).put(update_item_handler))
        .route("/items/one/", get(list_items_one_handler))
        .route("/items/two/", get(read_token_values_handler))
        .route("/items/three/", post(create_item_three_handler))
        .route("/items/four/", get(list_items_four_handler))
        .route("/items/ads/", get(read_ads_cookie_handler))
        .route("/items/strange/", get(read_strange_header_handler))
        .route("/unicorns/{name}", get(read_unicorn_handler))
        .route("/offers/", post(create_offer_handler))
        // Users
        .route("/user/", post(create_user_handler))
        .route("/users/", get(list_users_handler))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
                let request_id = uuid::Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %req.method(),
                    uri = %req.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        // Add the database pool to the application state
        .with_state(pool)
}

/// Runs the embedded migrations
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
///
/// ### Errors
///
/// Returns an error if any pending migration fails to apply
pub fn run_migrations(conn: &mut diesel::SqliteConnection) -> anyhow::Result<()> {
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Applied {} pending migrations", applied.len());
    Ok(())
}
