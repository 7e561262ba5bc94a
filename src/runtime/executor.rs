use crate::model::{Element, ElementEvent};
use crate::runtime::dispatcher::Dispatcher;
use crate::runtime::error::{ExecuteError, UnsupportedEventError};

/// Runs the event list of a triggered element through its dispatcher.
#[derive(Debug, Default)]
pub struct ActionExecutor<'h> {
    dispatcher: Dispatcher<'h>,
}

impl<'h> ActionExecutor<'h> {
    pub fn new(dispatcher: Dispatcher<'h>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher<'h> {
        &self.dispatcher
    }

    /// For rebinding handlers between runs.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<'h> {
        &mut self.dispatcher
    }

    pub fn into_dispatcher(self) -> Dispatcher<'h> {
        self.dispatcher
    }

    /// Dispatches `events` in order. Stops at the first event whose kind is
    /// not routed or whose handler fails; later events do not run.
    pub fn execute(&mut self, events: &[ElementEvent]) -> Result<(), ExecuteError> {
        for event in events {
            let kind = event.kind();
            if !self.dispatcher.is_routed(kind) {
                return Err(UnsupportedEventError { kind }.into());
            }
            tracing::debug!(%kind, "dispatching event");
            self.dispatcher.dispatch(event)?;
        }
        Ok(())
    }

    pub fn trigger(&mut self, element: &Element) -> Result<(), ExecuteError> {
        tracing::debug!(element = %element.id, events = element.events.len(), "element triggered");
        self.execute(&element.events)
    }
}
