//! Demo error type.

use domain::{CustomerError, DomainError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    /// A step produced different events than the walkthrough expects.
    #[error("{step}: expected {expected:?}, got {actual:?}")]
    UnexpectedOutcome {
        step: &'static str,
        expected: Vec<&'static str>,
        actual: Vec<&'static str>,
    },

    #[error("{step}: no confirmation hash was issued")]
    MissingConfirmationHash { step: &'static str },
}
