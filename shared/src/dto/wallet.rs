use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a wallet backend the header is willing to negotiate with
/// (e.g. `io.metamask`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletKind(String);

impl WalletKind {
    pub const METAMASK: &'static str = "io.metamask";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn metamask() -> Self {
        Self::new(Self::METAMASK)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WalletKind {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Externally-owned address identifying the user on a network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account(String);

impl Account {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Account {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

/// A blockchain network: chain id plus display metadata.
///
/// Two networks are the same network when their chain ids match; the display
/// fields are presentation only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub chain_id: u64,
    pub name: String,
    pub native_symbol: String,
    pub testnet: bool,
}

impl Network {
    pub fn new(chain_id: u64, name: impl Into<String>) -> Self {
        Self {
            chain_id,
            name: name.into(),
            native_symbol: "ETH".to_string(),
            testnet: false,
        }
    }

    pub fn mainnet() -> Self {
        Self::new(1, "Ethereum")
    }

    pub fn sepolia() -> Self {
        Self {
            testnet: true,
            ..Self::new(11_155_111, "Sepolia")
        }
    }

    /// Known networks, looked up by [`Network::lookup`].
    pub fn presets() -> Vec<Network> {
        vec![Self::mainnet(), Self::sepolia()]
    }

    /// Resolve a preset by case-insensitive name or by decimal chain id.
    ///
    /// Unknown numeric ids produce a bare network named after the id.
    pub fn lookup(name_or_id: &str) -> Option<Network> {
        let needle = name_or_id.trim();
        if needle.is_empty() {
            return None;
        }

        if let Ok(chain_id) = needle.parse::<u64>() {
            return Some(
                Self::presets()
                    .into_iter()
                    .find(|n| n.chain_id == chain_id)
                    .unwrap_or_else(|| Self::new(chain_id, format!("Chain {}", chain_id))),
            );
        }

        let lowered = needle.to_ascii_lowercase();
        let alias = match lowered.as_str() {
            "ethereum" | "eth" => "mainnet",
            other => other,
        };
        Self::presets().into_iter().find(|n| match alias {
            "mainnet" => n.chain_id == 1,
            other => n.name.to_ascii_lowercase() == other,
        })
    }
}

impl PartialEq for Network {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id
    }
}

impl Eq for Network {}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.chain_id)
    }
}
