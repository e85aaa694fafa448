//! sleepiq - client for the SleepIQ smart bed and Insights APIs
//!
//! Logs in to the vendor service, reads bed, sleeper and analytics state and
//! issues bed control commands.
//!
//! ```no_run
//! # async fn run() -> sleepiq::Result<()> {
//! let mut client = sleepiq::SleepIq::from_env()?;
//! client.login("user@example.com", "secret").await?;
//! for bed in client.beds().await?.beds {
//!     println!("{} {}", bed.bed_id, bed.name);
//! }
//! # Ok(())
//! # }
//! ```

// Note: deny (not forbid) to allow #[allow(unsafe_code)] in test helpers for env var manipulation
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod core;
pub mod error;
pub mod storage;
pub mod util;

/// Test utilities module - included in test builds or when test-utils feature is enabled.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use api::{ApiResponse, ServiceError, SleepIq};
pub use error::{ErrorCategory, Result, SessionKind, SleepIqError};
pub use storage::ClientConfig;

// Re-export test utilities for external test crates
#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::*;
