//! Connection session model.
//!
//! [`ConnectionSession`] fields are private and only the constructors in this
//! module build it, so `account` is present exactly when the state is
//! [`ConnectionState::Connected`].

use serde::Serialize;
use shared::{Account, Network, WalletKind};

use crate::error::NegotiationError;

/// Lifecycle state of the wallet connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
    Error,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnecting => "disconnecting",
            ConnectionState::Error => "error",
        }
    }

    /// A backend call is outstanding; presentation shows a busy affordance.
    pub fn is_pending(&self) -> bool {
        matches!(self, ConnectionState::Connecting | ConnectionState::Disconnecting)
    }
}

/// Snapshot of the wallet connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionSession {
    state: ConnectionState,
    account: Option<Account>,
    network: Option<Network>,
    wallet_kind: Option<WalletKind>,
    wrong_network: bool,
    error: Option<NegotiationError>,
}

impl Default for ConnectionSession {
    fn default() -> Self {
        Self::disconnected()
    }
}

impl ConnectionSession {
    pub fn disconnected() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            account: None,
            network: None,
            wallet_kind: None,
            wrong_network: false,
            error: None,
        }
    }

    pub(crate) fn connecting() -> Self {
        Self {
            state: ConnectionState::Connecting,
            ..Self::disconnected()
        }
    }

    pub(crate) fn connected(
        account: Account,
        network: Network,
        wallet_kind: WalletKind,
        configured: &Network,
    ) -> Self {
        Self {
            state: ConnectionState::Connected,
            wrong_network: network != *configured,
            account: Some(account),
            network: Some(network),
            wallet_kind: Some(wallet_kind),
            error: None,
        }
    }

    /// Identity is dropped as soon as a disconnect is requested.
    pub(crate) fn disconnecting(&self) -> Self {
        Self {
            state: ConnectionState::Disconnecting,
            wallet_kind: self.wallet_kind.clone(),
            ..Self::disconnected()
        }
    }

    pub(crate) fn failed(error: NegotiationError) -> Self {
        Self {
            state: ConnectionState::Error,
            error: Some(error),
            ..Self::disconnected()
        }
    }

    /// Resting state after a failure: disconnected, last reason retained.
    pub(crate) fn disconnected_after(error: NegotiationError) -> Self {
        Self {
            error: Some(error),
            ..Self::disconnected()
        }
    }

    pub(crate) fn with_account(&self, account: Account) -> Self {
        debug_assert_eq!(self.state, ConnectionState::Connected);
        Self {
            account: Some(account),
            ..self.clone()
        }
    }

    pub(crate) fn with_network(&self, network: Network, configured: &Network) -> Self {
        debug_assert_eq!(self.state, ConnectionState::Connected);
        Self {
            wrong_network: network != *configured,
            network: Some(network),
            ..self.clone()
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Connected account; `Some` only in the `Connected` state.
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Network the active connection is scoped to.
    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    pub fn wallet_kind(&self) -> Option<&WalletKind> {
        self.wallet_kind.as_ref()
    }

    /// Connected, but on a different network than configured.
    pub fn is_wrong_network(&self) -> bool {
        self.state == ConnectionState::Connected && self.wrong_network
    }

    /// Last negotiation failure, cleared by the next connect attempt.
    pub fn error(&self) -> Option<&NegotiationError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new("0xABC")
    }

    #[test]
    fn test_account_present_only_when_connected() {
        let kind = WalletKind::metamask();
        let connected = ConnectionSession::connected(account(), Network::sepolia(), kind, &Network::sepolia());
        assert!(connected.is_connected());
        assert_eq!(connected.account(), Some(&account()));

        for session in [
            ConnectionSession::disconnected(),
            ConnectionSession::connecting(),
            connected.disconnecting(),
            ConnectionSession::failed(NegotiationError::NoCompatibleWallet { attempts: vec![] }),
        ] {
            assert!(session.account().is_none(), "{:?}", session.state());
            assert!(!session.is_wrong_network());
        }
    }

    #[test]
    fn test_wrong_network_flag() {
        let session = ConnectionSession::connected(
            account(),
            Network::mainnet(),
            WalletKind::metamask(),
            &Network::sepolia(),
        );
        assert!(session.is_wrong_network());

        let switched = session.with_network(Network::sepolia(), &Network::sepolia());
        assert!(!switched.is_wrong_network());
        assert_eq!(switched.network(), Some(&Network::sepolia()));
        assert_eq!(switched.account(), Some(&account()));
    }

    #[test]
    fn test_disconnecting_drops_identity() {
        let session = ConnectionSession::connected(
            account(),
            Network::sepolia(),
            WalletKind::metamask(),
            &Network::sepolia(),
        );
        let leaving = session.disconnecting();
        assert_eq!(leaving.state(), ConnectionState::Disconnecting);
        assert!(leaving.account().is_none());
        assert!(leaving.network().is_none());
        assert_eq!(leaving.wallet_kind(), Some(&WalletKind::metamask()));
    }

    #[test]
    fn test_failure_keeps_reason_after_settling() {
        let err = NegotiationError::NoCompatibleWallet { attempts: vec![] };
        let settled = ConnectionSession::disconnected_after(err.clone());
        assert_eq!(settled.state(), ConnectionState::Disconnected);
        assert_eq!(settled.error(), Some(&err));
        assert!(ConnectionSession::connecting().error().is_none());
    }

    #[test]
    fn test_pending_states() {
        assert!(ConnectionState::Connecting.is_pending());
        assert!(ConnectionState::Disconnecting.is_pending());
        assert!(!ConnectionState::Connected.is_pending());
        assert_eq!(ConnectionState::Error.as_str(), "error");
    }
}
