//! # Connection State Manager
//!
//! Drives the wallet session through
//! `Disconnected → Connecting → Connected → Disconnecting → Disconnected`
//! and mediates between the [`WalletBackend`] and presentation.
//!
//! ## Guarantees
//!
//! - One negotiation in flight per session. `connect()` while connecting or
//!   connected returns the current session untouched.
//! - Every backend failure ends as a session state. `connect()` and
//!   `disconnect()` return the resulting [`ConnectionSession`], never an error.
//! - `disconnect()` always ends `Disconnected`, whatever the backend says.
//! - Each connect attempt carries an epoch. `disconnect()` and external
//!   disconnects bump it, so a negotiation that resolves after being
//!   cancelled is discarded instead of resurrecting `Connected`, and the
//!   connection the wallet granted for it is torn down again.
//! - The persisted wallet kind is saved and cleared under the session lock,
//!   in the same order as the transitions that cause them.
//! - Subscribers receive every transition in order.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lib_core::WalletClientConfig;
//! use lib_wallet::{ConnectionManager, SimulatedBackend};
//! use shared::{Network, WalletKind};
//!
//! # async fn run() {
//! let config = WalletClientConfig::create("client-id", vec![WalletKind::metamask()], Network::sepolia()).unwrap();
//! let manager = ConnectionManager::new(config, Arc::new(SimulatedBackend::new()));
//!
//! let updates = manager.subscribe();
//! let session = manager.connect().await;
//! println!("{:?} {:?}", session.state(), updates.drain());
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use lib_core::WalletClientConfig;
use parking_lot::Mutex;
use shared::WalletKind;

use crate::backend::{BackendEvent, NegotiationRequest, WalletBackend};
use crate::error::{BackendError, BackendTeardownError, FailedAttempt, NegotiationError};
use crate::session::{ConnectionSession, ConnectionState};
use crate::store::{MemorySessionStore, PersistedSession, SessionStore};
use crate::subscription::{Subscribers, Subscription};

/// Upper bound on how long `disconnect()` waits for the backend.
pub const DEFAULT_TEARDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Who started a negotiation. Auto-connect failures are silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    User,
    AutoConnect,
}

#[derive(Debug, Default)]
struct ManagerState {
    session: ConnectionSession,
    epoch: u64,
    subscribers: Subscribers,
}

impl ManagerState {
    fn transition(&mut self, next: ConnectionSession) {
        tracing::debug!(
            from = self.session.state().as_str(),
            to = next.state().as_str(),
            account = ?next.account().map(|a| a.as_str()),
            wrong_network = next.is_wrong_network(),
            "Wallet session transition"
        );
        self.session = next;
        self.subscribers.publish(&self.session);
    }
}

struct Inner {
    config: Arc<WalletClientConfig>,
    backend: Arc<dyn WalletBackend>,
    store: Arc<dyn SessionStore>,
    teardown_timeout: Duration,
    state: Mutex<ManagerState>,
}

/// Owner of the wallet [`ConnectionSession`]. Cheap to clone; clones share
/// the same session.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<Inner>,
}

impl ConnectionManager {
    /// Manager with an in-memory session store.
    pub fn new(config: WalletClientConfig, backend: Arc<dyn WalletBackend>) -> Self {
        Self::with_store(config, backend, Arc::new(MemorySessionStore::new()))
    }

    pub fn with_store(
        config: WalletClientConfig,
        backend: Arc<dyn WalletBackend>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self::build(Arc::new(config), backend, store, DEFAULT_TEARDOWN_TIMEOUT)
    }

    fn build(
        config: Arc<WalletClientConfig>,
        backend: Arc<dyn WalletBackend>,
        store: Arc<dyn SessionStore>,
        teardown_timeout: Duration,
    ) -> Self {
        tracing::debug!(config = ?config, "Connection manager created");
        Self {
            inner: Arc::new(Inner {
                config,
                backend,
                store,
                teardown_timeout,
                state: Mutex::new(ManagerState::default()),
            }),
        }
    }

    /// Same manager with a different teardown timeout. Call before sharing.
    pub fn with_teardown_timeout(self, timeout: Duration) -> Self {
        Self::build(
            self.inner.config.clone(),
            self.inner.backend.clone(),
            self.inner.store.clone(),
            timeout,
        )
    }

    pub fn config(&self) -> &WalletClientConfig {
        &self.inner.config
    }

    /// Current session. Never waits on the backend.
    pub fn current_session(&self) -> ConnectionSession {
        self.inner.state.lock().session.clone()
    }

    /// Register for session updates. The current session is delivered first.
    pub fn subscribe(&self) -> Subscription {
        let mut state = self.inner.state.lock();
        let current = state.session.clone();
        state.subscribers.register(&current)
    }

    /// Connect using the accepted wallet kinds in preference order.
    pub async fn connect(&self) -> ConnectionSession {
        let epoch = {
            let mut state = self.inner.state.lock();
            match state.session.state() {
                ConnectionState::Connecting | ConnectionState::Connected | ConnectionState::Disconnecting => {
                    tracing::debug!(state = state.session.state().as_str(), "connect() ignored");
                    return state.session.clone();
                }
                ConnectionState::Disconnected | ConnectionState::Error => {}
            }
            state.epoch += 1;
            state.transition(ConnectionSession::connecting());
            state.epoch
        };

        let kinds = self.inner.config.accepted_wallet_kinds().to_vec();
        self.negotiate(epoch, kinds, Origin::User).await
    }

    /// Reconnect silently with the wallet kind persisted by the last
    /// successful connection, when auto-connect is enabled.
    pub async fn auto_connect(&self) -> ConnectionSession {
        if !self.inner.config.auto_connect() {
            return self.current_session();
        }

        let persisted = match self.inner.store.load() {
            Ok(Some(persisted)) => persisted,
            Ok(None) => return self.current_session(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted wallet session");
                return self.current_session();
            }
        };

        if !self.inner.config.accepts(&persisted.wallet_kind) {
            tracing::info!(
                wallet = %persisted.wallet_kind,
                "Persisted wallet kind is no longer accepted, skipping auto-connect"
            );
            let state = self.inner.state.lock();
            if state.session.state() == ConnectionState::Disconnected {
                self.clear_store();
            }
            return state.session.clone();
        }

        let configured = self.inner.config.network().chain_id;
        if persisted.chain_id != configured {
            tracing::info!(
                wallet = %persisted.wallet_kind,
                persisted = persisted.chain_id,
                configured,
                "Persisted session belongs to another network, reconnecting on the configured one"
            );
        }

        let epoch = {
            let mut state = self.inner.state.lock();
            if state.session.state() != ConnectionState::Disconnected {
                return state.session.clone();
            }
            state.epoch += 1;
            state.transition(ConnectionSession::connecting());
            state.epoch
        };

        tracing::info!(wallet = %persisted.wallet_kind, "Auto-connecting wallet");
        self.negotiate(epoch, vec![persisted.wallet_kind], Origin::AutoConnect)
            .await
    }

    async fn negotiate(&self, epoch: u64, kinds: Vec<WalletKind>, origin: Origin) -> ConnectionSession {
        let config = &self.inner.config;
        let mut attempts: Vec<FailedAttempt> = Vec::new();

        for kind in kinds {
            if !self.is_current(epoch) {
                tracing::debug!(wallet = %kind, "Negotiation cancelled before attempt");
                return self.current_session();
            }

            let request = NegotiationRequest {
                kind: &kind,
                identity: config.identity(),
                network: config.network(),
            };

            match self.inner.backend.negotiate(request).await {
                Ok(negotiated) => {
                    let mut orphaned = false;
                    let accepted = {
                        let mut state = self.inner.state.lock();
                        if state.epoch != epoch || state.session.state() != ConnectionState::Connecting {
                            tracing::info!(
                                wallet = %kind,
                                state = state.session.state().as_str(),
                                "Discarding negotiation that resolved after cancellation"
                            );
                            orphaned = state.session.state() == ConnectionState::Disconnected;
                            None
                        } else {
                            state.transition(ConnectionSession::connected(
                                negotiated.account,
                                negotiated.network,
                                kind.clone(),
                                config.network(),
                            ));

                            // Written under the lock so a racing disconnect clears after it.
                            let persisted = PersistedSession {
                                wallet_kind: kind.clone(),
                                chain_id: config.network().chain_id,
                            };
                            if let Err(e) = self.inner.store.save(&persisted) {
                                tracing::warn!(error = %e, "Failed to persist wallet session");
                            }
                            Some(state.session.clone())
                        }
                    };

                    let Some(session) = accepted else {
                        // Cancelled and nothing newer started: the wallet still
                        // holds the connection it just granted.
                        if orphaned {
                            self.teardown_backend().await;
                        }
                        return self.current_session();
                    };

                    if session.is_wrong_network() {
                        tracing::warn!(
                            expected = %config.network(),
                            actual = ?session.network().map(|n| n.chain_id),
                            "Wallet connected on the wrong network"
                        );
                    } else {
                        tracing::info!(wallet = %kind, "Wallet connected");
                    }
                    return session;
                }
                Err(error) => {
                    tracing::warn!(wallet = %kind, error = %error, "Wallet negotiation failed");
                    attempts.push(FailedAttempt { kind, error });
                }
            }
        }

        let error = NegotiationError::NoCompatibleWallet { attempts };
        let session = {
            let mut state = self.inner.state.lock();
            if state.epoch != epoch || state.session.state() != ConnectionState::Connecting {
                return state.session.clone();
            }
            match origin {
                Origin::User => {
                    state.transition(ConnectionSession::failed(error.clone()));
                    state.transition(ConnectionSession::disconnected_after(error));
                }
                Origin::AutoConnect => {
                    tracing::info!("Auto-connect failed, waiting for user action");
                    state.transition(ConnectionSession::disconnected());
                    self.clear_store();
                }
            }
            state.session.clone()
        };

        session
    }

    /// Disconnect. Always ends `Disconnected`; backend teardown failures are
    /// logged only.
    pub async fn disconnect(&self) -> ConnectionSession {
        let (previous, epoch) = {
            let mut state = self.inner.state.lock();
            let previous = state.session.state();
            match previous {
                ConnectionState::Disconnected | ConnectionState::Disconnecting => {
                    return state.session.clone();
                }
                ConnectionState::Connecting | ConnectionState::Connected | ConnectionState::Error => {}
            }
            state.epoch += 1;
            let leaving = state.session.disconnecting();
            state.transition(leaving);
            (previous, state.epoch)
        };

        tracing::info!(from = previous.as_str(), "Disconnecting wallet");

        self.teardown_backend().await;

        // A backend drop during teardown already finished this disconnect,
        // and a newer session may own the store by now.
        let mut state = self.inner.state.lock();
        if state.epoch == epoch && state.session.state() == ConnectionState::Disconnecting {
            self.clear_store();
            state.transition(ConnectionSession::disconnected());
        }
        state.session.clone()
    }

    /// Apply one backend notification.
    pub fn handle_event(&self, event: BackendEvent) {
        let mut state = self.inner.state.lock();
        let current = state.session.state();

        match event {
            BackendEvent::AccountChanged(account) if current == ConnectionState::Connected => {
                if state.session.account() == Some(&account) {
                    return;
                }
                tracing::info!(account = %account, "Wallet account changed");
                let next = state.session.with_account(account);
                state.transition(next);
            }
            BackendEvent::NetworkChanged(network) if current == ConnectionState::Connected => {
                if state.session.network() == Some(&network) {
                    return;
                }
                tracing::info!(network = %network, "Wallet network changed");
                let next = state.session.with_network(network, self.inner.config.network());
                state.transition(next);
            }
            BackendEvent::Disconnected if current != ConnectionState::Disconnected => {
                tracing::info!(from = current.as_str(), "Wallet disconnected by backend");
                state.epoch += 1;
                state.transition(ConnectionSession::disconnected());
                self.clear_store();
            }
            event => {
                tracing::debug!(?event, state = current.as_str(), "Ignoring backend event");
            }
        }
    }

    /// Consume the backend's event stream until it ends.
    pub async fn run_backend_events(&self) {
        let mut events = self.inner.backend.events();
        while let Some(event) = events.next().await {
            self.handle_event(event);
        }
        tracing::debug!("Backend event stream ended");
    }

    /// Tear this session down and return a fresh manager bound to `config`,
    /// sharing the backend and session store. Subscribers of the old manager
    /// see their subscription end once every clone of it is dropped.
    pub async fn reset(self, config: WalletClientConfig) -> ConnectionManager {
        self.disconnect().await;
        tracing::info!("Wallet client configuration replaced, resetting connection manager");
        Self::build(
            Arc::new(config),
            self.inner.backend.clone(),
            self.inner.store.clone(),
            self.inner.teardown_timeout,
        )
    }

    async fn teardown_backend(&self) {
        let teardown = tokio::time::timeout(self.inner.teardown_timeout, self.inner.backend.disconnect()).await;
        let result = match teardown {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout),
        };
        if let Err(e) = result {
            let e = BackendTeardownError::from(e);
            tracing::warn!(error = %e, "Backend teardown failed, disconnecting locally");
        }
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.inner.state.lock().epoch == epoch
    }

    fn clear_store(&self) {
        if let Err(e) = self.inner.store.clear() {
            tracing::warn!(error = %e, "Failed to clear persisted wallet session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Negotiated;
    use crate::simulated::SimulatedBackend;
    use shared::{Account, Network};

    fn config(kinds: &[&str]) -> WalletClientConfig {
        WalletClientConfig::create(
            "client-id",
            kinds.iter().map(|k| WalletKind::new(*k)).collect(),
            Network::sepolia(),
        )
        .unwrap()
    }

    fn approve(account: &str, network: Network) -> Negotiated {
        Negotiated {
            account: Account::new(account),
            network,
        }
    }

    #[tokio::test]
    async fn test_connect_then_disconnect() {
        let backend = Arc::new(SimulatedBackend::new());
        backend.approve("A", approve("0xABC", Network::sepolia()));
        let manager = ConnectionManager::new(config(&["A"]), backend.clone());

        let session = manager.connect().await;
        assert_eq!(session.state(), ConnectionState::Connected);
        assert_eq!(session.account(), Some(&Account::new("0xABC")));
        assert_eq!(session.wallet_kind(), Some(&WalletKind::new("A")));

        let session = manager.disconnect().await;
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(session.account().is_none());
        assert_eq!(backend.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn test_connect_when_connected_is_noop() {
        let backend = Arc::new(SimulatedBackend::new());
        backend.approve("A", approve("0xABC", Network::sepolia()));
        let manager = ConnectionManager::new(config(&["A"]), backend.clone());

        manager.connect().await;
        manager.connect().await;
        assert_eq!(backend.negotiations().len(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_when_disconnected_is_noop() {
        let backend = Arc::new(SimulatedBackend::new());
        let manager = ConnectionManager::new(config(&["A"]), backend.clone());
        let updates = manager.subscribe();
        updates.drain();

        let session = manager.disconnect().await;
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert_eq!(backend.disconnect_count(), 0);
        assert!(updates.drain().is_empty());
    }

    #[tokio::test]
    async fn test_all_kinds_fail() {
        let backend = Arc::new(SimulatedBackend::new());
        backend.reject("A", BackendError::Rejected);
        let manager = ConnectionManager::new(config(&["A", "B"]), backend.clone());
        let updates = manager.subscribe();

        let session = manager.connect().await;
        assert_eq!(session.state(), ConnectionState::Disconnected);
        let error = session.error().unwrap();
        assert_eq!(error.reason_code(), "NoCompatibleWallet");
        assert_eq!(error.attempts().len(), 2);
        assert!(error.user_rejected());

        let states: Vec<_> = updates.drain().iter().map(|s| s.state()).collect();
        assert_eq!(
            states,
            vec![
                ConnectionState::Disconnected,
                ConnectionState::Connecting,
                ConnectionState::Error,
                ConnectionState::Disconnected,
            ]
        );
    }

    #[tokio::test]
    async fn test_retry_clears_error() {
        let backend = Arc::new(SimulatedBackend::new());
        let manager = ConnectionManager::new(config(&["A"]), backend.clone());

        assert!(manager.connect().await.error().is_some());

        backend.approve("A", approve("0xABC", Network::sepolia()));
        let updates = manager.subscribe();
        updates.drain();
        let session = manager.connect().await;
        assert!(session.error().is_none());

        let connecting = updates.try_next().unwrap();
        assert_eq!(connecting.state(), ConnectionState::Connecting);
        assert!(connecting.error().is_none());
    }

    #[tokio::test]
    async fn test_account_and_network_events() {
        let backend = Arc::new(SimulatedBackend::new());
        backend.approve("A", approve("0xABC", Network::sepolia()));
        let manager = ConnectionManager::new(config(&["A"]), backend.clone());
        manager.connect().await;

        manager.handle_event(BackendEvent::AccountChanged(Account::new("0xDEF")));
        assert_eq!(manager.current_session().account(), Some(&Account::new("0xDEF")));

        manager.handle_event(BackendEvent::NetworkChanged(Network::mainnet()));
        let session = manager.current_session();
        assert_eq!(session.state(), ConnectionState::Connected);
        assert!(session.is_wrong_network());

        manager.handle_event(BackendEvent::NetworkChanged(Network::sepolia()));
        assert!(!manager.current_session().is_wrong_network());
    }

    #[tokio::test]
    async fn test_events_ignored_when_not_connected() {
        let backend = Arc::new(SimulatedBackend::new());
        let manager = ConnectionManager::new(config(&["A"]), backend);
        let updates = manager.subscribe();
        updates.drain();

        manager.handle_event(BackendEvent::AccountChanged(Account::new("0xDEF")));
        manager.handle_event(BackendEvent::NetworkChanged(Network::mainnet()));
        manager.handle_event(BackendEvent::Disconnected);

        assert_eq!(manager.current_session(), ConnectionSession::disconnected());
        assert!(updates.drain().is_empty());
    }

    #[tokio::test]
    async fn test_external_disconnect_is_not_an_error() {
        let backend = Arc::new(SimulatedBackend::new());
        backend.approve("A", approve("0xABC", Network::sepolia()));
        let manager = ConnectionManager::new(config(&["A"]), backend.clone());
        manager.connect().await;

        manager.handle_event(BackendEvent::Disconnected);
        let session = manager.current_session();
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(session.error().is_none());
        assert_eq!(backend.disconnect_count(), 0);
    }

    #[tokio::test]
    async fn test_teardown_failure_still_disconnects() {
        let backend = Arc::new(SimulatedBackend::new());
        backend.approve("A", approve("0xABC", Network::sepolia()));
        backend.fail_teardown(BackendError::Other("extension crashed".to_string()));
        let manager = ConnectionManager::new(config(&["A"]), backend.clone());
        manager.connect().await;

        let session = manager.disconnect().await;
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_teardown_timeout_still_disconnects() {
        let backend = Arc::new(SimulatedBackend::new());
        backend.approve("A", approve("0xABC", Network::sepolia()));
        backend.hang_teardown();
        let manager = ConnectionManager::new(config(&["A"]), backend.clone())
            .with_teardown_timeout(Duration::from_millis(20));
        manager.connect().await;

        let session = manager.disconnect().await;
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }
}
