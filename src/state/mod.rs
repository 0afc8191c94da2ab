//! Domain state types for nordtray.
//!
//! - `connection`: parsed VPN status snapshot
//! - `display`: icon/hover/label triple pushed to the sink
//! - `settings`: poll settings snapshot
//! - `ui`: toasts and hover bookkeeping

mod connection;
mod display;
mod settings;
mod ui;

pub use connection::{ConnectionState, VpnStatus};
pub use display::{DisplayState, IconKey};
pub use settings::PollSettings;
pub use ui::{HoverSource, Toast, ToastType};
