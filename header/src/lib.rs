//! # Decentra Bid Header
//!
//! Header surface of the auction app: branding, the "Create new Auction"
//! link and the wallet connection control.
//!
//! - **[`view`]**: [`HeaderView`] and [`ConnectControl`], derived from the
//!   wallet session for any renderer
//! - **[`app`]**: [`Header`], the mounted header owning one connection manager

pub mod app;
pub mod view;

pub use app::Header;
pub use view::{ConnectControl, ControlAction, HeaderView, Theme};
