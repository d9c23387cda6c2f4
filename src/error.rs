use thiserror::Error;

use crate::flow::{ActionId, ConnectionId, ScreenId};

/// Failures reported by the strict `try_*` store operations.
///
/// The regular operations treat every one of these as a silent no-op; the
/// strict variants exist for callers that want to know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("screen {0} does not exist")]
    ScreenNotFound(ScreenId),

    #[error("connection {0} does not exist")]
    ConnectionNotFound(ConnectionId),

    #[error("action {action} does not exist on screen {screen}")]
    ActionNotFound { screen: ScreenId, action: ActionId },

    #[error("connection endpoint {0} does not exist")]
    DanglingEndpoint(ScreenId),
}

/// Result type for strict store operations
pub type FlowResult<T> = Result<T, FlowError>;
