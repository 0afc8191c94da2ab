//! Status acquisition and interpretation.
//!
//! - `probe`: runs the VPN client's status command
//! - `parser`: turns its text into a [`crate::state::VpnStatus`]
//! - `presenter`: derives the icon, hover text, and panel label
//! - `scheduler`: timer-driven polling with stale-result protection
//! - `sink`: receivers of display states
//! - `icons`, `launcher`: icon lookup and the user-script action

pub mod icons;
pub mod launcher;
pub mod parser;
pub mod presenter;
pub mod probe;
pub mod scheduler;
pub mod sink;
