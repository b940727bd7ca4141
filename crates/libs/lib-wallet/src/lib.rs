//! # Wallet Session Library
//!
//! Wallet connection lifecycle for the Decentra Bid header.
//!
//! ## Modules
//!
//! - **[`backend`]**: the [`WalletBackend`] seam (negotiate, disconnect, events)
//! - **[`session`]**: [`ConnectionSession`] snapshot and [`ConnectionState`]
//! - **[`manager`]**: [`ConnectionManager`], the state machine
//! - **[`subscription`]**: ordered session change notifications
//! - **[`store`]**: persisted session used by auto-connect
//! - **[`simulated`]**: scriptable in-process backend
//! - **[`error`]**: backend, negotiation, teardown and store errors

pub mod backend;
pub mod error;
pub mod manager;
pub mod session;
pub mod simulated;
pub mod store;
pub mod subscription;

pub use backend::{BackendEvent, Negotiated, NegotiationRequest, WalletBackend};
pub use error::{BackendError, BackendTeardownError, FailedAttempt, NegotiationError, StoreError};
pub use manager::{ConnectionManager, DEFAULT_TEARDOWN_TIMEOUT};
pub use session::{ConnectionSession, ConnectionState};
pub use simulated::{NegotiationGate, SimulatedBackend};
pub use store::{FileSessionStore, MemorySessionStore, PersistedSession, SessionStore};
pub use subscription::Subscription;
