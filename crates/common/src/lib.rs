//! Shared error handling for Teamline
//!
//! This crate provides the common error taxonomy used across the Teamline
//! application: an application-level `Error` with stable audit codes, and
//! the `Result` alias the domain crates build on.

pub mod error;

pub use error::{Error, Result};
