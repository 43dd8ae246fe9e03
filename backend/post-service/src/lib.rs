/// Post Service Library
///
/// CRUD endpoints for posts and tags. Persistence is reached only through the
/// store capabilities in `db`, which are injected into the router at startup.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route table
/// - `models`: Posts, users, tags and their request bodies
/// - `db`: Store traits plus in-memory and PostgreSQL backends
/// - `error`: Error types and HTTP error envelope
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;

pub use config::Config;
pub use db::Stores;
pub use error::{AppError, Result};
