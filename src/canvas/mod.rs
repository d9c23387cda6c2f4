//! Canvas interaction: turns pointer gestures into screen position updates.

pub mod geometry;
mod interaction;

pub use interaction::{CanvasInteraction, DragState};
