//! # Shared Wallet Types Library
//!
//! Types shared between the wallet session core (`lib-wallet`), configuration
//! (`lib-core`) and the header presentation crate. All DTOs use `serde` so a
//! session snapshot can be handed to any renderer or persisted as JSON.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::wallet`]**: networks, wallet kinds and accounts
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::truncate_address`]**: Truncate addresses with ellipsis
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::wallet::{Account, Network};
//! use shared::utils::truncate_address;
//!
//! let network = Network::sepolia();
//! let account = Account::new("0x1234567890123456789012345678901234567890");
//!
//! assert_eq!(network.chain_id, 11155111);
//! assert_eq!(truncate_address(account.as_str()), "0x1234...7890");
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: everything in a DTO library is public API
pub use dto::*;
pub use utils::*;
