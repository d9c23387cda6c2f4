//! Drag state machine for screen nodes.
//!
//! ```text
//! Idle -> Dragging   (pointer down on a screen node; also selects it)
//! Dragging -> Idle   (pointer up anywhere)
//! Dragging -> Idle   (Escape; restores the starting position)
//! Idle: click on empty background clears the selection
//! ```
//!
//! While dragging, each move recomputes the position from the captured start
//! point, so repeated moves never accumulate drift.

use egui::{Key, PointerButton, Pos2};

use super::geometry::clamp_position;
use crate::flow::{ScreenId, ScreenUpdate};
use crate::input::{CanvasTarget, InputEvent};
use crate::store::FlowStore;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        screen_id: ScreenId,
        /// Pointer position at pointer-down, in client coordinates
        start_pos: Pos2,
        /// Screen position when the drag began
        initial_screen_pos: Pos2,
    },
}

#[derive(Debug, Default)]
pub struct CanvasInteraction {
    state: DragState,
}

impl CanvasInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragged_screen(&self) -> Option<&ScreenId> {
        match &self.state {
            DragState::Dragging { screen_id, .. } => Some(screen_id),
            DragState::Idle => None,
        }
    }

    /// Starts dragging `screen_id` and selects it. A drag already in progress
    /// is replaced. Returns `false` if the screen does not exist.
    pub fn begin_drag(&mut self, store: &mut FlowStore, screen_id: &ScreenId, pointer: Pos2) -> bool {
        let Some(screen) = store.flow().screen(screen_id) else {
            return false;
        };

        self.state = DragState::Dragging {
            screen_id: screen_id.clone(),
            start_pos: pointer,
            initial_screen_pos: screen.position,
        };
        store.set_selected_screen(Some(screen_id.clone()));
        log::debug!("drag started on {screen_id}");
        true
    }

    /// Moves the dragged screen to follow `pointer`. Returns the new position.
    pub fn drag_to(&self, store: &mut FlowStore, pointer: Pos2) -> Option<Pos2> {
        let DragState::Dragging {
            screen_id,
            start_pos,
            initial_screen_pos,
        } = &self.state
        else {
            return None;
        };

        let delta = pointer - *start_pos;
        let position = clamp_position(*initial_screen_pos + delta);
        store.update_screen(screen_id, ScreenUpdate::position(position));
        Some(position)
    }

    /// Ends the drag, leaving the screen where it is.
    pub fn end_drag(&mut self) -> Option<ScreenId> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { screen_id, .. } => {
                log::debug!("drag ended on {screen_id}");
                Some(screen_id)
            }
            DragState::Idle => None,
        }
    }

    /// Aborts the drag and puts the screen back where it started.
    pub fn cancel_drag(&mut self, store: &mut FlowStore) {
        if let DragState::Dragging {
            screen_id,
            initial_screen_pos,
            ..
        } = std::mem::take(&mut self.state)
        {
            store.update_screen(&screen_id, ScreenUpdate::position(initial_screen_pos));
            log::debug!("drag cancelled on {screen_id}");
        }
    }

    /// Clicking empty canvas clears the selection, but only between drags.
    pub fn click_background(&self, store: &mut FlowStore) {
        if !self.is_dragging() {
            store.set_selected_screen(None);
        }
    }

    /// Routes one canvas input event.
    pub fn handle_event(&mut self, event: &InputEvent, store: &mut FlowStore) {
        match event {
            InputEvent::PointerDown {
                location,
                button: PointerButton::Primary,
            } => {
                if let CanvasTarget::Screen(screen_id) = &location.target {
                    self.begin_drag(store, screen_id, location.position);
                }
            }
            InputEvent::PointerMove { location, .. } => {
                self.drag_to(store, location.position);
            }
            InputEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            } => {
                self.end_drag();
            }
            InputEvent::Click { location } => {
                if location.target == CanvasTarget::Background {
                    self.click_background(store);
                }
            }
            InputEvent::KeyDown {
                key: Key::Escape, ..
            } => self.cancel_drag(store),
            _ => {}
        }
    }
}
