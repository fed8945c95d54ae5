//! API module
//!
//! HTTP surface of the backend: router construction, request handlers, and
//! the server lifecycle.

pub mod handlers;
pub mod routes;
pub mod server;

pub use handlers::AppState;
pub use server::ApiServer;
