//! # Wallet Session Errors
//!
//! Every failure the wallet backend can produce is caught at the
//! [`ConnectionManager`](crate::manager::ConnectionManager) boundary and turned
//! into a session state. None of these types escape `connect()` or
//! `disconnect()` as an `Err`.
//!
//! ## Error Categories
//!
//! - [`BackendError`]: a single call into the wallet backend failed
//! - [`NegotiationError`]: no accepted wallet kind produced a connection;
//!   recoverable, surfaced as the `Error` state, the user may retry
//! - [`BackendTeardownError`]: the backend failed to tear a connection down;
//!   logged only, the local session still reaches `Disconnected`
//! - [`StoreError`]: the persisted session could not be read or written
//!
//! A wrong network is not an error; see
//! [`ConnectionSession::is_wrong_network`](crate::session::ConnectionSession::is_wrong_network).

use serde::Serialize;
use shared::WalletKind;
use thiserror::Error;

/// Failure reported by a wallet backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum BackendError {
    /// The user dismissed or rejected the request in the wallet UI.
    #[error("request rejected by user")]
    Rejected,

    /// The wallet kind is not available in this browser.
    #[error("wallet '{0}' is not installed")]
    NotInstalled(WalletKind),

    /// The backend did not answer in time.
    #[error("wallet backend timed out")]
    Timeout,

    /// Any other backend failure.
    #[error("wallet backend error: {0}")]
    Other(String),
}

/// One failed negotiation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedAttempt {
    pub kind: WalletKind,
    pub error: BackendError,
}

/// Connection negotiation failed for every accepted wallet kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum NegotiationError {
    #[error("no compatible wallet accepted the connection ({} attempted)", attempts.len())]
    NoCompatibleWallet { attempts: Vec<FailedAttempt> },
}

impl NegotiationError {
    /// Stable reason code for presentation.
    pub fn reason_code(&self) -> &'static str {
        match self {
            NegotiationError::NoCompatibleWallet { .. } => "NoCompatibleWallet",
        }
    }

    pub fn attempts(&self) -> &[FailedAttempt] {
        match self {
            NegotiationError::NoCompatibleWallet { attempts } => attempts,
        }
    }

    /// True when at least one wallet was reached and the user said no.
    pub fn user_rejected(&self) -> bool {
        self.attempts()
            .iter()
            .any(|a| matches!(a.error, BackendError::Rejected))
    }
}

/// Backend-side disconnect failure. Never blocks the local `Disconnected` state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("wallet teardown failed: {0}")]
pub struct BackendTeardownError(#[from] pub BackendError);

/// Persisted session read/write failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
