//! Pure state models. Nothing in here performs I/O.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod dashboard;

/// A rejected user input; the text is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
