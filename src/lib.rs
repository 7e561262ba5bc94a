pub mod config;
pub mod expr;
pub mod host;
pub mod logging;
pub mod model;
pub mod runtime;

pub use expr::{evaluate, substitute_for_display, Substitution};
pub use model::{decode_event, describe, encode_event, DecodeError, Element, ElementEvent, EventKind};
pub use runtime::{ActionExecutor, Dispatcher, ExecuteError, HandlerError, UnsupportedEventError};
