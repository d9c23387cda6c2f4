use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

use crate::canvas::geometry;
use crate::flow::{FlowData, ScreenId};

/// What lies under the pointer when an input event occurs
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasTarget {
    /// A screen node on the canvas
    Screen(ScreenId),
    /// Empty canvas background
    Background,
    /// Anywhere outside the canvas (side panels, outside the window)
    Outside,
}

/// Represents the location where an input event occurred
#[derive(Debug, Clone, PartialEq)]
pub struct InputLocation {
    /// The position in screen (client) coordinates
    pub position: Pos2,
    pub target: CanvasTarget,
}

/// Represents different types of input events that can occur on the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse button was released, wherever the pointer is
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
    },
    /// Primary button pressed and released without dragging
    Click { location: InputLocation },
    /// Key was pressed while no text field had focus
    KeyDown { key: Key, modifiers: Modifiers },
}

impl InputEvent {
    pub fn target(&self) -> Option<&CanvasTarget> {
        match self {
            InputEvent::PointerDown { location, .. }
            | InputEvent::PointerUp { location, .. }
            | InputEvent::PointerMove { location, .. }
            | InputEvent::Click { location } => Some(&location.target),
            InputEvent::KeyDown { .. } => None,
        }
    }
}

/// Handles converting raw egui input into canvas InputEvents
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    /// Screen position of canvas coordinate (0, 0)
    canvas_origin: Pos2,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect: Rect::NOTHING,
            canvas_origin: Pos2::ZERO,
        }
    }

    /// Update the visible canvas area and where its origin currently sits
    /// (the origin moves when the canvas is scrolled).
    pub fn set_canvas_geometry(&mut self, visible_rect: Rect, origin: Pos2) {
        self.canvas_rect = visible_rect;
        self.canvas_origin = origin;
    }

    pub fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_origin).to_pos2()
    }

    /// Creates an InputLocation from a position
    pub fn make_location(&self, pos: Pos2, flow: &FlowData) -> InputLocation {
        let target = if !self.canvas_rect.contains(pos) {
            CanvasTarget::Outside
        } else {
            match geometry::hit_test(flow, self.to_canvas(pos)) {
                Some(id) => CanvasTarget::Screen(id.clone()),
                None => CanvasTarget::Background,
            }
        };
        InputLocation {
            position: pos,
            target,
        }
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context, flow: &FlowData) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let keyboard_free = !ctx.wants_keyboard_input();

        ctx.input(|input| {
            if let Some(pos) = input.pointer.hover_pos() {
                if Some(pos) != self.last_pointer_pos {
                    let held_buttons = [
                        PointerButton::Primary,
                        PointerButton::Secondary,
                        PointerButton::Middle,
                    ]
                    .into_iter()
                    .filter(|button| input.pointer.button_down(*button))
                    .collect();
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos, flow),
                        held_buttons,
                    });
                }
                self.last_pointer_pos = Some(pos);
            }

            // Releases are reported even when the pointer has left the window,
            // using the last position we saw.
            let release_pos = input
                .pointer
                .latest_pos()
                .or(self.last_pointer_pos)
                .unwrap_or(Pos2::ZERO);

            for button in [PointerButton::Primary, PointerButton::Secondary, PointerButton::Middle] {
                if input.pointer.button_pressed(button) {
                    if let Some(pos) = input.pointer.interact_pos() {
                        events.push(InputEvent::PointerDown {
                            location: self.make_location(pos, flow),
                            button,
                        });
                    }
                }
                if input.pointer.button_released(button) {
                    events.push(InputEvent::PointerUp {
                        location: self.make_location(release_pos, flow),
                        button,
                    });
                }
            }

            if input.pointer.button_clicked(PointerButton::Primary) {
                events.push(InputEvent::Click {
                    location: self.make_location(release_pos, flow),
                });
            }

            if keyboard_free {
                for event in &input.raw.events {
                    if let egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } = event
                    {
                        events.push(InputEvent::KeyDown {
                            key: *key,
                            modifiers: *modifiers,
                        });
                    }
                }
            }
        });

        events
    }
}
