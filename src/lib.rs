#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod event;
pub mod flow;
pub mod input;
pub mod panels;
pub mod preview;
pub mod renderer;
pub mod store;
pub mod util;

pub use app::FlowBuilderApp;
pub use canvas::{CanvasInteraction, DragState};
pub use config::{EditorConfig, SeedFlow};
pub use error::{FlowError, FlowResult};
pub use event::{EventBus, EventHandler, FlowEvent, LogEventHandler};
pub use flow::{FlowData, Screen, ScreenId};
pub use input::{CanvasTarget, InputEvent, InputHandler, InputLocation};
pub use preview::PreviewSession;
pub use renderer::FlowRenderer;
pub use store::{FlowHandle, FlowStore};
