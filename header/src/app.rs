//! Mounted header: owns the connection manager for one page session.

use std::sync::Arc;

use lib_core::{ConfigError, WalletClientConfig};
use lib_wallet::{ConnectionManager, ConnectionSession, SessionStore, Subscription, WalletBackend};

use crate::view::{ControlAction, HeaderView};

/// A mounted header. Dropping it unmounts the in-memory session; the
/// wallet's own connection and the persisted wallet kind survive.
pub struct Header {
    config: Result<WalletClientConfig, ConfigError>,
    manager: Option<ConnectionManager>,
}

impl Header {
    /// Mount the header. An invalid configuration still mounts branding and
    /// navigation, but no connection manager is created.
    pub fn mount(
        config: Result<WalletClientConfig, ConfigError>,
        backend: Arc<dyn WalletBackend>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let manager = match &config {
            Ok(config) => Some(ConnectionManager::with_store(config.clone(), backend, store)),
            Err(e) => {
                tracing::error!(error = %e, "Wallet client configuration invalid, connect control disabled");
                None
            }
        };

        Self { config, manager }
    }

    pub fn manager(&self) -> Option<&ConnectionManager> {
        self.manager.as_ref()
    }

    pub fn session(&self) -> ConnectionSession {
        self.manager
            .as_ref()
            .map(|m| m.current_session())
            .unwrap_or_default()
    }

    pub fn view(&self) -> HeaderView {
        HeaderView::render(self.config.as_ref(), &self.session())
    }

    /// Subscribe to session changes, `None` when the control is unavailable.
    pub fn subscribe(&self) -> Option<Subscription> {
        self.manager.as_ref().map(|m| m.subscribe())
    }

    /// Run auto-connect from the persisted session, if any.
    pub async fn start(&self) -> HeaderView {
        if let Some(manager) = &self.manager {
            manager.auto_connect().await;
        }
        self.view()
    }

    /// Handle a click on the wallet control.
    pub async fn activate(&self, action: ControlAction) -> HeaderView {
        let Some(manager) = &self.manager else {
            return self.view();
        };

        match action {
            ControlAction::Connect => {
                manager.connect().await;
            }
            ControlAction::Disconnect => {
                manager.disconnect().await;
            }
        }
        self.view()
    }
}
