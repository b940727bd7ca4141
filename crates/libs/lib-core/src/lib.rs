//! # Core Library
//!
//! Wallet client configuration, the configuration error type and logging setup
//! shared by the wallet session crates.

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::WalletClientConfig;
pub use error::{ConfigError, Result};
