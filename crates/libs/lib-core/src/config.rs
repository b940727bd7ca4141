//! # Wallet Client Configuration
//!
//! The wallet client context: which wallet backends the header will negotiate
//! with, which network it operates against, and the application credential
//! presented to the wallet infrastructure.
//!
//! A [`WalletClientConfig`] is constructed once and injected into the
//! connection manager. It has no setters; a different network or wallet list
//! means building a new config and resetting the manager.
//!
//! ```rust
//! use lib_core::config::WalletClientConfig;
//! use shared::{Network, WalletKind};
//!
//! let config = WalletClientConfig::create(
//!     "f76f50283af21db4ef0e6eec33b378eb",
//!     vec![WalletKind::metamask()],
//!     Network::sepolia(),
//! )
//! .unwrap();
//!
//! assert_eq!(config.network().chain_id, 11155111);
//! ```

use std::fmt;

use lib_utils::envs::{get_env, get_env_bool, get_env_or, split_list};
use lib_utils::validation::{validate_non_empty_list, validate_not_empty};
use shared::{Network, WalletKind};

use crate::error::{ConfigError, Result};

pub const ENV_CLIENT_ID: &str = "AUCTION_CLIENT_ID";
pub const ENV_WALLETS: &str = "AUCTION_WALLETS";
pub const ENV_CHAIN: &str = "AUCTION_CHAIN";
pub const ENV_AUTO_CONNECT: &str = "AUCTION_AUTO_CONNECT";
pub const ENV_SESSION_FILE: &str = "AUCTION_SESSION_FILE";

/// Where the header persists the last connected wallet kind.
pub const DEFAULT_SESSION_FILE: &str = "data/wallet-session.json";

const DEFAULT_CHAIN: &str = "sepolia";

/// Immutable wallet client context.
#[derive(Clone)]
pub struct WalletClientConfig {
    identity: String,
    accepted_wallet_kinds: Vec<WalletKind>,
    network: Network,
    auto_connect: bool,
}

impl WalletClientConfig {
    /// Build and validate a configuration.
    ///
    /// Duplicate wallet kinds are dropped, keeping the first occurrence so the
    /// preference order is preserved. Auto-connect is enabled by default.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyIdentity`] when `identity` is blank
    /// - [`ConfigError::NoWalletKinds`] when no wallet kind is given
    pub fn create(
        identity: impl Into<String>,
        accepted_wallet_kinds: Vec<WalletKind>,
        network: Network,
    ) -> Result<Self> {
        let identity = identity.into();
        validate_not_empty(&identity, "identity").map_err(|_| ConfigError::EmptyIdentity)?;

        let mut kinds: Vec<WalletKind> = Vec::with_capacity(accepted_wallet_kinds.len());
        for kind in accepted_wallet_kinds {
            if !kind.as_str().trim().is_empty() && !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        validate_non_empty_list(&kinds, "accepted wallet kinds")
            .map_err(|_| ConfigError::NoWalletKinds)?;

        Ok(Self {
            identity,
            accepted_wallet_kinds: kinds,
            network,
            auto_connect: true,
        })
    }

    /// Same configuration with auto-connect switched on or off.
    pub fn with_auto_connect(mut self, auto_connect: bool) -> Self {
        self.auto_connect = auto_connect;
        self
    }

    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `AUCTION_CLIENT_ID` | required |
    /// | `AUCTION_WALLETS` | `io.metamask` |
    /// | `AUCTION_CHAIN` | `sepolia` |
    /// | `AUCTION_AUTO_CONNECT` | `true` |
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let identity = get_env(ENV_CLIENT_ID)?;
        let wallets = get_env_or(ENV_WALLETS, WalletKind::METAMASK);
        let chain = get_env_or(ENV_CHAIN, DEFAULT_CHAIN);
        let auto_connect = match get_env_bool(ENV_AUTO_CONNECT) {
            Ok(flag) => flag,
            Err(lib_utils::envs::Error::MissingEnv(_)) => true,
            Err(err) => return Err(err.into()),
        };

        let config = Self::from_parts(&identity, &wallets, &chain)?.with_auto_connect(auto_connect);

        tracing::info!(
            wallets = ?config.accepted_wallet_kinds,
            network = %config.network,
            auto_connect = config.auto_connect,
            "Wallet client configuration loaded"
        );

        Ok(config)
    }

    /// Build a configuration from raw textual values: a comma separated
    /// wallet list and a network name or chain id.
    pub fn from_parts(identity: &str, wallets: &str, chain: &str) -> Result<Self> {
        let network = Network::lookup(chain).ok_or_else(|| ConfigError::UnknownNetwork(chain.to_string()))?;
        let kinds = split_list(wallets).into_iter().map(WalletKind::new).collect();

        Self::create(identity, kinds, network)
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Wallet kinds in preference order.
    pub fn accepted_wallet_kinds(&self) -> &[WalletKind] {
        &self.accepted_wallet_kinds
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn auto_connect(&self) -> bool {
        self.auto_connect
    }

    pub fn accepts(&self, kind: &WalletKind) -> bool {
        self.accepted_wallet_kinds.contains(kind)
    }
}

// The identity is an application credential; keep it out of logs.
impl fmt::Debug for WalletClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletClientConfig")
            .field("identity", &"<redacted>")
            .field("accepted_wallet_kinds", &self.accepted_wallet_kinds)
            .field("network", &self.network)
            .field("auto_connect", &self.auto_connect)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(ids: &[&str]) -> Vec<WalletKind> {
        ids.iter().map(|id| WalletKind::new(*id)).collect()
    }

    #[test]
    fn test_create_valid() {
        let config = WalletClientConfig::create("client", kinds(&["A", "B"]), Network::sepolia()).unwrap();
        assert_eq!(config.identity(), "client");
        assert_eq!(config.accepted_wallet_kinds(), kinds(&["A", "B"]).as_slice());
        assert_eq!(config.network(), &Network::sepolia());
        assert!(config.auto_connect());
        assert!(config.accepts(&WalletKind::new("B")));
        assert!(!config.accepts(&WalletKind::new("C")));
    }

    #[test]
    fn test_create_rejects_empty_identity() {
        let err = WalletClientConfig::create("  ", kinds(&["A"]), Network::sepolia()).unwrap_err();
        assert_eq!(err, ConfigError::EmptyIdentity);
    }

    #[test]
    fn test_create_rejects_empty_wallet_kinds() {
        let err = WalletClientConfig::create("client", vec![], Network::sepolia()).unwrap_err();
        assert_eq!(err, ConfigError::NoWalletKinds);

        let err = WalletClientConfig::create("client", kinds(&[" "]), Network::sepolia()).unwrap_err();
        assert_eq!(err, ConfigError::NoWalletKinds);
    }

    #[test]
    fn test_duplicate_kinds_keep_first_position() {
        let config = WalletClientConfig::create("client", kinds(&["B", "A", "B"]), Network::mainnet()).unwrap();
        assert_eq!(config.accepted_wallet_kinds(), kinds(&["B", "A"]).as_slice());
    }

    #[test]
    fn test_from_parts() {
        let config = WalletClientConfig::from_parts("client", "io.metamask, com.coinbase.wallet", "sepolia").unwrap();
        assert_eq!(config.accepted_wallet_kinds(), kinds(&["io.metamask", "com.coinbase.wallet"]).as_slice());
        assert_eq!(config.network().chain_id, 11_155_111);

        let err = WalletClientConfig::from_parts("client", "io.metamask", "goerli").unwrap_err();
        assert_eq!(err, ConfigError::UnknownNetwork("goerli".to_string()));

        let err = WalletClientConfig::from_parts("client", " , ", "1").unwrap_err();
        assert_eq!(err, ConfigError::NoWalletKinds);
    }

    #[test]
    fn test_debug_redacts_identity() {
        let config = WalletClientConfig::create("f76f50283af21db4", kinds(&["A"]), Network::sepolia()).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("f76f50283af21db4"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_session_file_defaults_when_unset() {
        if std::env::var(ENV_SESSION_FILE).is_err() {
            assert_eq!(get_env_or(ENV_SESSION_FILE, DEFAULT_SESSION_FILE), "data/wallet-session.json");
        }
    }

    #[test]
    fn test_with_auto_connect() {
        let config = WalletClientConfig::create("client", kinds(&["A"]), Network::sepolia())
            .unwrap()
            .with_auto_connect(false);
        assert!(!config.auto_connect());
    }
}
