//! Backend API client — the single home of the REST wire contract.
//!
//! Blocking reqwest client (no Tokio runtime required). Covers project,
//! room, and item CRUD plus the bulk item create used by undo.
//!
//! No UI concepts. No retries. No progress reporting.

mod client;
mod config;

pub use client::{ApiClient, ApiError};
pub use config::{ApiConfig, API_BASE_ENV, DEFAULT_API_BASE};
