//! HTTP server module (axum).
//!
//! This module provides the REST API for frontend integration. It is only
//! compiled with the `http-server` feature.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
