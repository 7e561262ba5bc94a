pub mod dispatcher;
pub mod error;
pub mod executor;

pub use dispatcher::{Dispatcher, HandlerResult, Routable, DEFAULT_ROUTED};
pub use error::{ExecuteError, HandlerError, UnsupportedEventError};
pub use executor::ActionExecutor;
