use std::error::Error as StdError;

use thiserror::Error;

use crate::model::EventKind;

/// Failure raised by a host handler. Passed through the dispatcher and
/// executor untouched.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        HandlerError::new(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        HandlerError::new(message)
    }
}

/// An event reached the executor but its kind is not routed by the
/// dispatcher. Means a new event kind was added without wiring a handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported event type: {kind}")]
pub struct UnsupportedEventError {
    pub kind: EventKind,
}

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedEventError),
    #[error(transparent)]
    Handler(#[from] HandlerError),
}
