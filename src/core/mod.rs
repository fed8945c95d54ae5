//! Core module
//!
//! Cross-cutting concerns shared by the rest of the crate: configuration,
//! the error type, logging setup, and the upload directory store.

pub mod config;
pub mod error;
pub mod logging;
pub mod uploads;

pub use config::Config;
pub use error::{KicksError, Result};
pub use logging::Logger;
pub use uploads::UploadStore;
