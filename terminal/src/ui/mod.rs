//! # Terminal Front-end
//!
//! The presentation layer: everything the user sees and types.
//!
//! - **[`commands`]**: parsing of prompt lines into [`commands::Command`]s
//! - **[`password`]**: no-echo password entry on interactive terminals
//! - **[`render`]**: plain-text formatting of messages, book lists and prompts
//! - **[`repl`]**: the interactive loop driving a [`crate::app::SessionStore`]
//!
//! The front-end holds no conversation state of its own beyond the selected
//! chat mode; everything else is read back from the store after each call.

pub mod commands;
pub mod password;
pub mod render;
pub mod repl;

pub use repl::Repl;
