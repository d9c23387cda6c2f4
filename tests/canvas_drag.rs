use egui::{Key, Modifiers, PointerButton, Pos2, pos2};
use flow_builder::canvas::geometry::MIN_NODE_COORD;
use flow_builder::flow::{ScreenTemplate, ScreenType};
use flow_builder::{
    CanvasInteraction, CanvasTarget, DragState, FlowData, FlowStore, InputEvent, InputLocation,
    ScreenId,
};

// Helper to create a store holding two screens
fn create_test_store() -> (FlowStore, ScreenId, ScreenId) {
    let mut store = FlowStore::new(FlowData::default());
    let first = store.add_screen(ScreenTemplate::for_type(ScreenType::Welcome).new_screen_at(pos2(100.0, 100.0)));
    let second = store.add_screen(ScreenTemplate::for_type(ScreenType::Form).new_screen_at(pos2(500.0, 300.0)));
    (store, first, second)
}

fn location(position: Pos2, target: CanvasTarget) -> InputLocation {
    InputLocation { position, target }
}

fn press_on(screen: &ScreenId, at: Pos2) -> InputEvent {
    InputEvent::PointerDown {
        location: location(at, CanvasTarget::Screen(screen.clone())),
        button: PointerButton::Primary,
    }
}

fn move_to(at: Pos2, target: CanvasTarget) -> InputEvent {
    InputEvent::PointerMove {
        location: location(at, target),
        held_buttons: vec![PointerButton::Primary],
    }
}

fn release_at(at: Pos2, target: CanvasTarget) -> InputEvent {
    InputEvent::PointerUp {
        location: location(at, target),
        button: PointerButton::Primary,
    }
}

fn position_of(store: &FlowStore, id: &ScreenId) -> Pos2 {
    store.flow().screen(id).unwrap().position
}

#[test]
fn test_pointer_down_starts_drag_and_selects() {
    let (mut store, first, _) = create_test_store();
    let mut canvas = CanvasInteraction::new();

    canvas.handle_event(&press_on(&first, pos2(150.0, 150.0)), &mut store);

    assert_eq!(
        canvas.state(),
        &DragState::Dragging {
            screen_id: first.clone(),
            start_pos: pos2(150.0, 150.0),
            initial_screen_pos: pos2(100.0, 100.0),
        }
    );
    assert_eq!(store.selected_screen_id(), Some(&first));
}

#[test]
fn test_drag_clamps_to_minimum_coordinate() {
    let (mut store, first, _) = create_test_store();
    let mut canvas = CanvasInteraction::new();

    canvas.handle_event(&press_on(&first, pos2(150.0, 150.0)), &mut store);
    canvas.handle_event(&move_to(pos2(-500.0, 145.0), CanvasTarget::Outside), &mut store);

    let position = position_of(&store, &first);
    assert_eq!(position.x, MIN_NODE_COORD);
    assert_eq!(position.y, 95.0);

    canvas.handle_event(&move_to(pos2(0.0, -1000.0), CanvasTarget::Outside), &mut store);
    let position = position_of(&store, &first);
    assert_eq!(position, pos2(MIN_NODE_COORD, MIN_NODE_COORD));
}

#[test]
fn test_drag_recompute_has_no_drift() {
    let (mut store, first, _) = create_test_store();
    let mut canvas = CanvasInteraction::new();
    let start = pos2(133.3, 177.7);

    canvas.handle_event(&press_on(&first, start), &mut store);

    canvas.handle_event(&move_to(start + egui::vec2(12.1, 7.3), CanvasTarget::Background), &mut store);
    let after_d1 = position_of(&store, &first);
    canvas.handle_event(&move_to(start + egui::vec2(-40.7, 90.9), CanvasTarget::Background), &mut store);
    canvas.handle_event(&move_to(start + egui::vec2(12.1, 7.3), CanvasTarget::Background), &mut store);
    let after_d1_again = position_of(&store, &first);

    assert_eq!(after_d1, after_d1_again);
}

#[test]
fn test_release_outside_canvas_ends_drag() {
    let (mut store, first, _) = create_test_store();
    let mut canvas = CanvasInteraction::new();

    canvas.handle_event(&press_on(&first, pos2(150.0, 150.0)), &mut store);
    canvas.handle_event(&move_to(pos2(250.0, 250.0), CanvasTarget::Background), &mut store);
    canvas.handle_event(&release_at(pos2(-20.0, 3000.0), CanvasTarget::Outside), &mut store);

    assert_eq!(canvas.state(), &DragState::Idle);
    assert_eq!(position_of(&store, &first), pos2(200.0, 200.0));

    // Later moves no longer touch the screen
    canvas.handle_event(&move_to(pos2(900.0, 900.0), CanvasTarget::Background), &mut store);
    assert_eq!(position_of(&store, &first), pos2(200.0, 200.0));
}

#[test]
fn test_last_pointer_down_wins() {
    let (mut store, first, second) = create_test_store();
    let mut canvas = CanvasInteraction::new();

    canvas.handle_event(&press_on(&first, pos2(150.0, 150.0)), &mut store);
    canvas.handle_event(&press_on(&second, pos2(550.0, 350.0)), &mut store);
    canvas.handle_event(&move_to(pos2(560.0, 360.0), CanvasTarget::Background), &mut store);

    assert_eq!(canvas.dragged_screen(), Some(&second));
    assert_eq!(store.selected_screen_id(), Some(&second));
    assert_eq!(position_of(&store, &first), pos2(100.0, 100.0));
    assert_eq!(position_of(&store, &second), pos2(510.0, 310.0));
}

#[test]
fn test_background_click_clears_selection_when_idle() {
    let (mut store, first, _) = create_test_store();
    let mut canvas = CanvasInteraction::new();
    store.set_selected_screen(Some(first));

    let click = InputEvent::Click {
        location: location(pos2(900.0, 900.0), CanvasTarget::Background),
    };
    canvas.handle_event(&click, &mut store);

    assert_eq!(store.selected_screen_id(), None);
}

#[test]
fn test_pointer_down_on_background_does_not_drag() {
    let (mut store, _, _) = create_test_store();
    let mut canvas = CanvasInteraction::new();

    let press = InputEvent::PointerDown {
        location: location(pos2(900.0, 900.0), CanvasTarget::Background),
        button: PointerButton::Primary,
    };
    canvas.handle_event(&press, &mut store);

    assert!(!canvas.is_dragging());
}

#[test]
fn test_escape_cancels_drag() {
    let (mut store, first, _) = create_test_store();
    let mut canvas = CanvasInteraction::new();

    canvas.handle_event(&press_on(&first, pos2(150.0, 150.0)), &mut store);
    canvas.handle_event(&move_to(pos2(400.0, 400.0), CanvasTarget::Background), &mut store);
    canvas.handle_event(
        &InputEvent::KeyDown {
            key: Key::Escape,
            modifiers: Modifiers::NONE,
        },
        &mut store,
    );

    assert!(!canvas.is_dragging());
    assert_eq!(position_of(&store, &first), pos2(100.0, 100.0));
    // Selection made by the drag stays
    assert_eq!(store.selected_screen_id(), Some(&first));
}
