//! Common test utilities for the integration tests.
//!
//! # Modules
//!
//! - `fixtures`: fixture loaders, mock-server clients and mocks
//! - `log_capture`: capture of the client's tracing events
//! - `logger`: phase-tracked test logging

pub mod fixtures;
pub mod log_capture;
pub mod logger;
