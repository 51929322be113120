// --- File: crates/promocast_common/src/lib.rs ---
//! Shared pieces of promocast: the error base type, logging set-up,
//! notification models and the platform ports.

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Notification data structures
pub mod services; // Platform port abstractions

// Re-export error types and utilities for easier access
pub use error::{validation_error, Context, HttpStatusCode, PromocastError};

// Re-export HTTP utilities for easier access
pub use http::client::{create_client, HTTP_CLIENT};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_result};
