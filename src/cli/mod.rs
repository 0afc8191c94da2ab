//! Command-line interface module.
//!
//! Provides argument parsing and the headless commands.

pub mod args;
pub mod commands;
