use crate::flow::{ConnectionId, ScreenId};

/// Notifications emitted by the flow store after a successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    ScreenAdded {
        screen_id: ScreenId,
    },
    ScreenUpdated {
        screen_id: ScreenId,
    },
    ScreenDeleted {
        screen_id: ScreenId,
        /// Connections removed along with the screen
        removed_connections: Vec<ConnectionId>,
    },
    ConnectionAdded {
        connection_id: ConnectionId,
    },
    ConnectionDeleted {
        connection_id: ConnectionId,
    },
    SelectionChanged {
        old: Option<ScreenId>,
        new: Option<ScreenId>,
    },
}
