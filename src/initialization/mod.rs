//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - HTTP client (timeouts, pt-BR browser headers, redirect policy)
//! - Logger
//! - Admission gate for concurrent site analyses

mod client;
mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes a semaphore for controlling concurrency.
///
/// The semaphore is the admission gate of a batch: each site analysis holds
/// one permit for its whole duration. A count of zero is bumped to one so a
/// misconfigured run still makes progress.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}
