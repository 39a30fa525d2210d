//! Chronicler Core - Shared foundation for changelog automation
//!
//! This crate provides the error types, configuration loading and CI event
//! model used by the other Chronicler crates.

pub mod config;
pub mod error;
pub mod types;

pub use error::{ChronicleError, Result};
pub use types::CiEvent;
