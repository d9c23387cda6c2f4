use crate::event::{EventHandler, FlowEvent};

/// Writes every flow event to the log at debug level
#[derive(Debug, Default)]
pub struct LogEventHandler;

impl EventHandler for LogEventHandler {
    fn handle_event(&mut self, event: &FlowEvent) {
        log::debug!("flow event: {:?}", event);
    }
}
