//! # Wallet Backend Seam
//!
//! The header never talks to a wallet directly. Everything it needs from the
//! browser-embedded wallet (an extension such as MetaMask, or an SDK that
//! fronts several of them) goes through [`WalletBackend`]:
//!
//! - `negotiate` one wallet kind, yielding an account and the network the
//!   wallet is currently on
//! - `disconnect` the live connection
//! - `events`: account, network and disconnect notifications raised by the
//!   wallet outside the application's control
//!
//! Implementations own the wire protocol; the manager only orchestrates.

use async_trait::async_trait;
use futures::stream::BoxStream;
use shared::{Account, Network, WalletKind};

use crate::error::BackendError;

/// Parameters of one negotiation attempt.
#[derive(Debug, Clone, Copy)]
pub struct NegotiationRequest<'a> {
    pub kind: &'a WalletKind,
    /// Application credential presented to the wallet infrastructure.
    pub identity: &'a str,
    /// Network the application wants to operate on.
    pub network: &'a Network,
}

/// Successful negotiation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiated {
    pub account: Account,
    /// The network the wallet actually connected on; may differ from the
    /// requested one.
    pub network: Network,
}

/// Notifications pushed by the wallet backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    AccountChanged(Account),
    NetworkChanged(Network),
    /// The wallet ended the session on its own (locked, revoked, uninstalled).
    Disconnected,
}

/// External wallet-connection provider.
#[async_trait]
pub trait WalletBackend: Send + Sync {
    /// Negotiate a connection with one wallet kind.
    async fn negotiate(&self, request: NegotiationRequest<'_>) -> Result<Negotiated, BackendError>;

    /// Tear down the current connection.
    async fn disconnect(&self) -> Result<(), BackendError>;

    /// Stream of backend notifications. Called once per event pump.
    fn events(&self) -> BoxStream<'static, BackendEvent>;
}
