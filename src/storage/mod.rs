//! Client configuration storage.

pub mod config;
pub mod paths;

pub use config::{
    ClientConfig, DEFAULT_API_BASE, DEFAULT_INSIGHTS_BASE, DEFAULT_SUBSCRIPTION_KEY,
    DEFAULT_TIMEOUT_SECONDS, ENV_API_BASE, ENV_CONFIG, ENV_INSIGHTS_BASE, ENV_SUBSCRIPTION_KEY,
    ENV_TIMEOUT,
};
pub use paths::AppPaths;
