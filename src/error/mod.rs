//! Comprehensive error handling system using `thiserror` and `anyhow`.
//!
//! This module provides the error kinds the message extractor recognizes,
//! the front-end's own errors, and operational helpers for logging errors
//! and turning them into user-facing messages.

pub mod domain;
pub mod operational;

pub use {
    domain::{DomainError, InvocationError, UiError},
    operational::{ErrorReporter, ResultExt},
};
