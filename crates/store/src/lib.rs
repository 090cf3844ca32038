//! `atelier-store` — the stateful layer over the backend client.
//!
//! Owns the in-memory room/item cache for one project and routes every
//! bulk mutation through the chunked batch executor so the backend's rate
//! limit is respected.

mod batch;
mod store;

pub use batch::{run_chunked, BatchConfig, BatchFailure, BatchReport};
pub use store::{ProjectStore, StoreError};
