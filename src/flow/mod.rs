//! The onboarding flow data model: screens, their actions, and the
//! connections between them, gathered under one [`FlowData`] aggregate.
//!
//! References between screens (`fromScreenId`, `targetScreenId`) are plain id
//! values resolved on read; nothing here owns another screen.

mod edit;
mod id;
mod model;
mod template;
pub mod validate;

pub use edit::PropertyEdit;
pub use id::{ActionId, ConnectionId, FlowId, ScreenId};
pub use model::{
    Action, Animation, Connection, FlowData, NewAction, NewConnection, NewScreen, Screen,
    ScreenLayout, ScreenProperties, ScreenSize, ScreenStyle, ScreenType, ScreenUpdate, Trigger,
};
pub use template::{SCREEN_TEMPLATES, ScreenTemplate, TEMPLATE_DROP_POSITION, demo_flow, template_of};
pub use validate::{FlowIssue, validate};
