//! Header view-model - branding, navigation and the wallet control
//!
//! Renderers draw a [`HeaderView`]; they never inspect the wallet session
//! themselves.

use lib_core::{ConfigError, WalletClientConfig};
use lib_wallet::{ConnectionSession, ConnectionState};
use serde::Serialize;
use shared::utils::truncate_address;

pub const BRAND_TITLE: &str = "Decentra Bid";
pub const HOME_ROUTE: &str = "/";
pub const CREATE_LISTING_LABEL: &str = "Create new Auction";
pub const CREATE_LISTING_ROUTE: &str = "/createlisting";
pub const CONNECT_LABEL: &str = "Connect Wallet";
pub const RETRY_LABEL: &str = "Try Again";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// What a click on the wallet control asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    Connect,
    Disconnect,
}

/// Wallet control affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectControl {
    /// Configuration is invalid; no connect control is offered.
    Unavailable { reason: String },
    Connect { label: String },
    Connecting,
    Connected {
        account: String,
        display: String,
        network: String,
    },
    /// Connected, but the wallet is on another network. The user has to
    /// switch networks in the wallet.
    WrongNetwork {
        display: String,
        expected: String,
        actual: String,
    },
    Disconnecting,
    Retry {
        label: String,
        reason_code: String,
        message: String,
    },
}

impl ConnectControl {
    pub fn from_session(session: &ConnectionSession, config: &WalletClientConfig) -> Self {
        match session.state() {
            ConnectionState::Connecting => ConnectControl::Connecting,
            ConnectionState::Disconnecting => ConnectControl::Disconnecting,
            ConnectionState::Connected => {
                let account = session.account().map(|a| a.to_string()).unwrap_or_default();
                let display = truncate_address(&account);
                let actual = session.network().map(|n| n.name.clone()).unwrap_or_default();
                if session.is_wrong_network() {
                    ConnectControl::WrongNetwork {
                        display,
                        expected: config.network().name.clone(),
                        actual,
                    }
                } else {
                    ConnectControl::Connected {
                        account,
                        display,
                        network: actual,
                    }
                }
            }
            ConnectionState::Disconnected | ConnectionState::Error => match session.error() {
                Some(error) => {
                    let message = if error.user_rejected() {
                        "Connection request was rejected in the wallet".to_string()
                    } else {
                        "No supported wallet is available".to_string()
                    };
                    ConnectControl::Retry {
                        label: RETRY_LABEL.to_string(),
                        reason_code: error.reason_code().to_string(),
                        message,
                    }
                }
                None => ConnectControl::Connect {
                    label: CONNECT_LABEL.to_string(),
                },
            },
        }
    }

    /// Action bound to the control, `None` while a backend call is pending
    /// or when the control is unavailable.
    pub fn action(&self) -> Option<ControlAction> {
        match self {
            ConnectControl::Connect { .. } | ConnectControl::Retry { .. } => Some(ControlAction::Connect),
            ConnectControl::Connected { .. } | ConnectControl::WrongNetwork { .. } => {
                Some(ControlAction::Disconnect)
            }
            ConnectControl::Unavailable { .. } | ConnectControl::Connecting | ConnectControl::Disconnecting => None,
        }
    }
}

/// Everything the header renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub branding: Link,
    pub nav: Link,
    pub control: ConnectControl,
    pub theme: Theme,
}

impl HeaderView {
    pub fn render(config: Result<&WalletClientConfig, &ConfigError>, session: &ConnectionSession) -> Self {
        let control = match config {
            Ok(config) => ConnectControl::from_session(session, config),
            Err(e) => ConnectControl::Unavailable { reason: e.to_string() },
        };

        Self {
            branding: Link::new(BRAND_TITLE, HOME_ROUTE),
            nav: Link::new(CREATE_LISTING_LABEL, CREATE_LISTING_ROUTE),
            control,
            theme: Theme::default(),
        }
    }
}
