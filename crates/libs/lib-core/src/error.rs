//! # Configuration Errors
//!
//! [`ConfigError`] is fatal at startup: a header without a valid
//! [`WalletClientConfig`](crate::config::WalletClientConfig) must not render
//! its connect control at all.
//!
//! ```rust
//! use lib_core::error::ConfigError;
//!
//! let err = ConfigError::EmptyIdentity;
//! assert_eq!(err.to_string(), "Configuration error: identity must not be empty");
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, ConfigError>`.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Invalid wallet client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The application credential is missing or blank.
    #[error("Configuration error: identity must not be empty")]
    EmptyIdentity,

    /// No wallet backend kinds were accepted.
    #[error("Configuration error: accepted wallet kinds must not be empty")]
    NoWalletKinds,

    /// The configured network name or chain id is not recognised.
    #[error("Configuration error: unknown network '{0}'")]
    UnknownNetwork(String),

    /// An environment variable is missing or malformed.
    #[error("Configuration error: {0}")]
    Env(String),
}

impl From<lib_utils::envs::Error> for ConfigError {
    fn from(err: lib_utils::envs::Error) -> Self {
        match err {
            lib_utils::envs::Error::MissingEnv(name) => {
                ConfigError::Env(format!("{} must be set in environment", name))
            }
            lib_utils::envs::Error::WrongFormat(name) => {
                ConfigError::Env(format!("{} has an invalid value", name))
            }
        }
    }
}
