//! # Utility Functions
//!
//! - **[`validation`]**: Input validation for the login form and chat prompt
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Serde helpers for the wire types
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
