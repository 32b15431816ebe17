//! API Module
//!
//! Console-facing surface over the core logic.
//!
//! Structure:
//! - commands.rs: command parsing and execution
//! - view.rs: plain-text rendering of form, session and catalog state

pub mod commands;
pub mod view;

pub use commands::{Command, CommandError, Console, Outcome};
