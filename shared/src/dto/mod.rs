//! # Data Transfer Objects (DTOs)
//!
//! ## Module Organization
//!
//! - [`wallet`] - Networks, wallet backend kinds and accounts
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Newtypes**: `WalletKind` and `Account` serialize as bare strings
//!
//! ```text
//! {
//!   "chain_id": 11155111,
//!   "name": "Sepolia",
//!   "native_symbol": "ETH",
//!   "testnet": true
//! }
//! ```

pub mod wallet;

pub use wallet::*;
