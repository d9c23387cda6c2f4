use flow_builder::flow::{self, FlowIssue, NewConnection, ScreenTemplate, ScreenUpdate, demo_flow};
use flow_builder::{FlowData, FlowStore, PreviewSession};

#[test]
fn test_next_visits_every_screen_in_order() {
    let flow = demo_flow();
    let len = flow.screens.len();
    let mut session = PreviewSession::new(0.0);

    let mut visited = vec![session.index(len)];
    while session.next(len, 0.0) {
        visited.push(session.index(len));
    }

    assert_eq!(visited, (0..len).collect::<Vec<_>>());
    assert_eq!(session.current_screen(&flow).unwrap().id, flow.screens[len - 1].id);
    assert_eq!(session.progress_label(len), format!("{len} of {len}"));

    // Refuses to go past the end
    assert!(!session.next(len, 0.0));
    assert_eq!(session.index(len), len - 1);
}

#[test]
fn test_previous_stops_at_first_screen() {
    let len = 3;
    let mut session = PreviewSession::new(0.0);

    assert!(!session.previous(len, 0.0));
    assert!(session.next(len, 0.0));
    assert!(session.previous(len, 0.0));
    assert_eq!(session.index(len), 0);
    assert!(!session.previous(len, 0.0));
    assert_eq!(session.progress_label(len), "1 of 3");
}

#[test]
fn test_demo_flow_validates_cleanly() {
    assert!(flow::validate(&demo_flow()).is_empty());
}

#[test]
fn test_validation_reports_structural_issues() {
    let mut store = FlowStore::new(FlowData::default());
    let template = ScreenTemplate::for_type(flow::ScreenType::Welcome);
    let a = store.add_screen(template.new_screen());
    let b = store.add_screen(template.new_screen());
    let c = store.add_screen(template.new_screen());
    store.add_connection(NewConnection::between(a.clone(), b.clone()));
    store.add_connection(NewConnection::between(b.clone(), a.clone()));
    store.add_connection(NewConnection::between(b.clone(), "screen-ghost".into()));

    let issues = flow::validate(store.flow());
    assert!(issues.contains(&FlowIssue::NoStartScreen));
    assert!(issues.iter().any(|issue| matches!(issue, FlowIssue::DanglingConnection { .. })));

    store.update_screen(
        &a,
        ScreenUpdate {
            is_start_screen: Some(true),
            ..Default::default()
        },
    );
    let issues = flow::validate(store.flow());
    assert!(!issues.contains(&FlowIssue::NoStartScreen));
    assert!(issues.contains(&FlowIssue::Unreachable(c)));
    assert!(issues.iter().any(|issue| matches!(issue, FlowIssue::Cycle(_))));

    // Validation never changes the flow
    assert_eq!(store.flow().connections.len(), 3);
}
