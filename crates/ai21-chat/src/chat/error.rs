//! Chat adapter error types.

use thiserror::Error;

use crate::client::ClientError;

/// Errors raised while converting messages or calling the provider.
#[derive(Debug, Error)]
pub enum ChatError {
    /// A system message appeared after the first position.
    #[error("system message must be at beginning of message list (found at index {index})")]
    InvalidMessageOrder { index: usize },

    /// The system message payload is not plain text.
    #[error("system message must be plain text, got {found}")]
    InvalidSystemContent { found: &'static str },

    /// The message role has no provider counterpart.
    #[error("could not resolve role type from message {message}; only human and assistant are supported")]
    UnsupportedRole { message: String },

    /// A human or assistant message carries non-text content.
    #[error("message {message} must have plain text content")]
    UnsupportedContent { message: String },

    /// The model name matches neither J2 nor Jamba.
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),

    /// The client call failed.
    #[error("chat call failed: {0}")]
    CallFailed(#[from] ClientError),

    /// The provider returned no choices.
    #[error("provider response contained no choices")]
    EmptyResponse,
}
