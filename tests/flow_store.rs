use std::collections::HashSet;

use egui::pos2;
use flow_builder::flow::{
    NewAction, NewConnection, NewScreen, PropertyEdit, ScreenTemplate, ScreenType, ScreenUpdate,
};
use flow_builder::{FlowData, FlowStore, ScreenId};

// Helper to create a screen from a template at a given spot
fn screen_at(screen_type: ScreenType, x: f32, y: f32) -> NewScreen {
    ScreenTemplate::for_type(screen_type).new_screen_at(pos2(x, y))
}

fn empty_store() -> FlowStore {
    FlowStore::new(FlowData::default())
}

#[test]
fn test_screen_ids_are_unique() {
    let mut store = empty_store();
    let ids: Vec<ScreenId> = (0..200)
        .map(|i| store.add_screen(screen_at(ScreenType::Feature, i as f32, 0.0)))
        .collect();

    let distinct: HashSet<&ScreenId> = ids.iter().collect();
    assert_eq!(distinct.len(), ids.len());

    // Insertion order is preserved
    let stored: Vec<&ScreenId> = store.flow().screens.iter().map(|screen| &screen.id).collect();
    assert_eq!(stored, ids.iter().collect::<Vec<_>>());
}

#[test]
fn test_add_screen_then_connect() {
    let mut store = empty_store();
    let first = store.add_screen(screen_at(ScreenType::Welcome, 200.0, 200.0));
    let second = store.add_screen(screen_at(ScreenType::Feature, 600.0, 200.0));
    store.add_connection(NewConnection::between(first.clone(), second.clone()));

    let flow = store.flow();
    assert_eq!(flow.screens.len(), 2);
    assert_eq!(flow.connections.len(), 1);

    let (from, to) = flow
        .resolve_connection(&flow.connections[0])
        .expect("both endpoints should resolve");
    assert_eq!(from.id, first);
    assert_eq!(to.id, second);
    assert_eq!(from.screen_type, ScreenType::Welcome);
    assert_eq!(from.position, pos2(200.0, 200.0));
}

#[test]
fn test_delete_screen_cascades_connections() {
    let mut store = empty_store();
    let a = store.add_screen(screen_at(ScreenType::Welcome, 0.0, 0.0));
    let b = store.add_screen(screen_at(ScreenType::Form, 0.0, 0.0));
    let c = store.add_screen(screen_at(ScreenType::Success, 0.0, 0.0));
    store.add_connection(NewConnection::between(a.clone(), b.clone()));
    store.add_connection(NewConnection::between(b.clone(), c.clone()));
    store.add_connection(NewConnection::between(c.clone(), b.clone()));
    let kept = store.add_connection(NewConnection::between(a.clone(), c.clone()));

    store.delete_screen(&b);

    let flow = store.flow();
    assert!(!flow.contains_screen(&b));
    assert!(flow.connections.iter().all(|conn| !conn.touches(&b)));
    assert_eq!(flow.connections.len(), 1);
    assert_eq!(flow.connections[0].id, kept);
}

#[test]
fn test_delete_clears_selection() {
    let mut store = empty_store();
    let a = store.add_screen(screen_at(ScreenType::Welcome, 0.0, 0.0));
    let b = store.add_screen(screen_at(ScreenType::Form, 0.0, 0.0));

    store.set_selected_screen(Some(a.clone()));
    store.delete_screen(&b);
    assert_eq!(store.selected_screen_id(), Some(&a));

    store.delete_screen(&a);
    assert_eq!(store.selected_screen_id(), None);
}

#[test]
fn test_delete_is_idempotent() {
    let mut store = empty_store();
    let a = store.add_screen(screen_at(ScreenType::Welcome, 0.0, 0.0));
    let b = store.add_screen(screen_at(ScreenType::Form, 0.0, 0.0));
    store.add_connection(NewConnection::between(a.clone(), b.clone()));

    store.delete_screen(&a);
    let once = store.export_flow();
    store.delete_screen(&a);

    assert_eq!(store.export_flow(), once);

    let ghost = "connection-ghost".into();
    store.delete_connection(&ghost);
    assert_eq!(store.export_flow(), once);
}

#[test]
fn test_update_unknown_screen_leaves_screens_alone() {
    let mut store = FlowStore::new(flow_builder::flow::demo_flow());
    let before = store.export_flow();

    store.update_screen(&"screen-ghost".into(), ScreenUpdate::position(pos2(999.0, 999.0)));

    let after = store.export_flow();
    assert_eq!(after.screens, before.screens);
    assert_eq!(after.connections, before.connections);
    assert!(after.updated_at >= before.updated_at);
}

#[test]
fn test_update_is_shallow_merge() {
    let mut store = empty_store();
    let id = store.add_screen(screen_at(ScreenType::Tutorial, 50.0, 60.0));
    let original = store.flow().screen(&id).cloned().unwrap();

    store.update_screen(&id, ScreenUpdate::position(pos2(70.0, 80.0)));

    let updated = store.flow().screen(&id).unwrap();
    assert_eq!(updated.position, pos2(70.0, 80.0));
    assert_eq!(updated.properties, original.properties);
    assert_eq!(updated.screen_type, original.screen_type);
}

#[test]
fn test_property_edits_rebuild_nested_values() {
    let mut store = empty_store();
    let id = store.add_screen(screen_at(ScreenType::Form, 0.0, 0.0));

    store.edit_property(&id, PropertyEdit::BackgroundColor("#0f172a".to_owned()));
    store.edit_property(&id, PropertyEdit::Title("Tell us about you".to_owned()));

    let props = &store.flow().screen(&id).unwrap().properties;
    assert_eq!(props.style.background_color, "#0f172a");
    assert_eq!(props.style.text_color, "#1e293b");
    assert_eq!(props.title, "Tell us about you");
    assert_eq!(props.button_text, "Continue");

    // Unknown screens are ignored
    store.edit_property(&"screen-ghost".into(), PropertyEdit::Title("x".to_owned()));
    assert_eq!(store.flow().screens.len(), 1);
}

#[test]
fn test_actions_can_be_added_and_removed() {
    let mut store = empty_store();
    let a = store.add_screen(screen_at(ScreenType::Welcome, 0.0, 0.0));
    let b = store.add_screen(screen_at(ScreenType::Success, 0.0, 0.0));

    let action = store
        .add_action(&a, NewAction::click_to(b.clone()))
        .expect("screen exists");
    {
        let flow = store.flow();
        let screen = flow.screen(&a).unwrap();
        let target = flow.resolve_action_target(&screen.actions[0]).unwrap();
        assert_eq!(target.id, b);
    }

    // Deleting the target leaves the action dangling rather than removing it
    store.delete_screen(&b);
    {
        let flow = store.flow();
        let screen = flow.screen(&a).unwrap();
        assert_eq!(screen.actions.len(), 1);
        assert!(flow.resolve_action_target(&screen.actions[0]).is_none());
    }

    store.remove_action(&a, &action);
    assert!(store.flow().screen(&a).unwrap().actions.is_empty());
    assert!(store.add_action(&"screen-ghost".into(), NewAction::click_to(a)).is_none());
}

#[test]
fn test_connections_to_missing_screens_are_accepted() {
    let mut store = empty_store();
    let a = store.add_screen(screen_at(ScreenType::Welcome, 0.0, 0.0));

    store.add_connection(NewConnection::between(a, "screen-ghost".into()));

    let flow = store.flow();
    assert_eq!(flow.connections.len(), 1);
    assert!(flow.resolve_connection(&flow.connections[0]).is_none());
}
