//! Opt-in structural checks for a flow graph.
//!
//! The store never runs these; callers that want graph guarantees (before a
//! preview, say) ask for a report and decide what to do with it.

use std::collections::{HashMap, HashSet, VecDeque};

use thiserror::Error;

use super::id::{ActionId, ConnectionId, ScreenId};
use super::model::FlowData;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowIssue {
    #[error("connection {connection} points at missing screen {screen}")]
    DanglingConnection {
        connection: ConnectionId,
        screen: ScreenId,
    },

    #[error("action {action} on screen {screen} targets missing screen {target}")]
    DanglingActionTarget {
        screen: ScreenId,
        action: ActionId,
        target: ScreenId,
    },

    #[error("flow has no start screen")]
    NoStartScreen,

    #[error("flow has {} start screens", .0.len())]
    MultipleStartScreens(Vec<ScreenId>),

    #[error("screen {0} is not reachable from the start screen")]
    Unreachable(ScreenId),

    #[error("connections loop back to screen {0}")]
    Cycle(ScreenId),
}

impl FlowIssue {
    /// Dangling references break rendering or preview; the rest are advisory.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            FlowIssue::DanglingConnection { .. } | FlowIssue::DanglingActionTarget { .. }
        )
    }
}

pub fn validate(flow: &FlowData) -> Vec<FlowIssue> {
    let mut issues = Vec::new();
    let known: HashSet<&ScreenId> = flow.screens.iter().map(|screen| &screen.id).collect();

    for conn in &flow.connections {
        for endpoint in [&conn.from_screen_id, &conn.to_screen_id] {
            if !known.contains(endpoint) {
                issues.push(FlowIssue::DanglingConnection {
                    connection: conn.id.clone(),
                    screen: endpoint.clone(),
                });
            }
        }
    }

    for screen in &flow.screens {
        for action in &screen.actions {
            if let Some(target) = &action.target_screen_id {
                if !known.contains(target) {
                    issues.push(FlowIssue::DanglingActionTarget {
                        screen: screen.id.clone(),
                        action: action.id.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
    }

    if flow.screens.is_empty() {
        return issues;
    }

    let starts: Vec<ScreenId> = flow.start_screens().map(|screen| screen.id.clone()).collect();
    let adjacency = adjacency(flow, &known);

    match starts.as_slice() {
        [] => issues.push(FlowIssue::NoStartScreen),
        [start] => {
            let reached = reachable_from(start, &adjacency);
            issues.extend(
                flow.screens
                    .iter()
                    .filter(|screen| !reached.contains(&screen.id))
                    .map(|screen| FlowIssue::Unreachable(screen.id.clone())),
            );
        }
        _ => issues.push(FlowIssue::MultipleStartScreens(starts)),
    }

    issues.extend(find_cycles(flow, &known).into_iter().map(FlowIssue::Cycle));
    issues
}

/// Successors through connections and action targets, dangling edges dropped.
fn adjacency<'a>(
    flow: &'a FlowData,
    known: &HashSet<&'a ScreenId>,
) -> HashMap<&'a ScreenId, Vec<&'a ScreenId>> {
    let mut edges: HashMap<&ScreenId, Vec<&ScreenId>> = HashMap::new();
    for conn in &flow.connections {
        if known.contains(&conn.from_screen_id) && known.contains(&conn.to_screen_id) {
            edges.entry(&conn.from_screen_id).or_default().push(&conn.to_screen_id);
        }
    }
    for screen in &flow.screens {
        for target in screen.actions.iter().filter_map(|a| a.target_screen_id.as_ref()) {
            if known.contains(target) {
                edges.entry(&screen.id).or_default().push(target);
            }
        }
    }
    edges
}

fn reachable_from<'a>(
    start: &ScreenId,
    adjacency: &HashMap<&'a ScreenId, Vec<&'a ScreenId>>,
) -> HashSet<ScreenId> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(start.clone());
    queue.push_back(start.clone());

    while let Some(current) = queue.pop_front() {
        for next in adjacency.get(&current).into_iter().flatten() {
            if seen.insert((*next).clone()) {
                queue.push_back((*next).clone());
            }
        }
    }
    seen
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Screens that are the target of a back edge in the connection graph.
fn find_cycles(flow: &FlowData, known: &HashSet<&ScreenId>) -> Vec<ScreenId> {
    let mut successors: HashMap<&ScreenId, Vec<&ScreenId>> = HashMap::new();
    for conn in &flow.connections {
        if known.contains(&conn.from_screen_id) && known.contains(&conn.to_screen_id) {
            successors.entry(&conn.from_screen_id).or_default().push(&conn.to_screen_id);
        }
    }

    let mut marks: HashMap<&ScreenId, Mark> = HashMap::new();
    let mut loops = Vec::new();

    for screen in &flow.screens {
        if marks.contains_key(&screen.id) {
            continue;
        }
        // Iterative DFS: (node, index of next successor to visit)
        let mut stack: Vec<(&ScreenId, usize)> = vec![(&screen.id, 0)];
        marks.insert(&screen.id, Mark::Visiting);

        while let Some((node, next_index)) = stack.pop() {
            let next = successors.get(node).and_then(|succ| succ.get(next_index)).copied();
            match next {
                Some(child) => {
                    stack.push((node, next_index + 1));
                    match marks.get(child) {
                        Some(Mark::Visiting) => {
                            if !loops.contains(child) {
                                loops.push(child.clone());
                            }
                        }
                        Some(Mark::Done) => {}
                        None => {
                            marks.insert(child, Mark::Visiting);
                            stack.push((child, 0));
                        }
                    }
                }
                None => {
                    marks.insert(node, Mark::Done);
                }
            }
        }
    }

    loops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{NewConnection, ScreenTemplate, ScreenType, demo_flow};

    fn screen(flow: &mut FlowData, id: &str) {
        flow.screens.push(
            ScreenTemplate::for_type(ScreenType::Feature)
                .new_screen()
                .into_screen(ScreenId::from(id)),
        );
    }

    fn connect(flow: &mut FlowData, from: &str, to: &str) {
        let id = format!("{from}->{to}");
        flow.connections.push(
            NewConnection::between(from.into(), to.into()).into_connection(id.as_str().into()),
        );
    }

    #[test]
    fn demo_flow_is_clean() {
        assert!(validate(&demo_flow()).is_empty());
    }

    #[test]
    fn empty_flow_has_no_issues() {
        assert!(validate(&FlowData::default()).is_empty());
    }

    #[test]
    fn reports_dangling_connection_endpoints() {
        let mut flow = FlowData::default();
        screen(&mut flow, "a");
        flow.screens[0].is_start_screen = Some(true);
        connect(&mut flow, "a", "ghost");

        let issues = validate(&flow);
        assert!(issues.contains(&FlowIssue::DanglingConnection {
            connection: "a->ghost".into(),
            screen: "ghost".into(),
        }));
        assert!(issues.iter().any(FlowIssue::is_error));
    }

    #[test]
    fn reports_start_screen_problems() {
        let mut flow = FlowData::default();
        screen(&mut flow, "a");
        screen(&mut flow, "b");
        assert!(validate(&flow).contains(&FlowIssue::NoStartScreen));

        flow.screens[0].is_start_screen = Some(true);
        flow.screens[1].is_start_screen = Some(true);
        assert!(validate(&flow).contains(&FlowIssue::MultipleStartScreens(vec![
            "a".into(),
            "b".into()
        ])));
    }

    #[test]
    fn reports_unreachable_and_cycles() {
        let mut flow = FlowData::default();
        for id in ["a", "b", "c", "island"] {
            screen(&mut flow, id);
        }
        flow.screens[0].is_start_screen = Some(true);
        connect(&mut flow, "a", "b");
        connect(&mut flow, "b", "c");
        connect(&mut flow, "c", "a");

        let issues = validate(&flow);
        assert!(issues.contains(&FlowIssue::Unreachable("island".into())));
        assert!(issues.contains(&FlowIssue::Cycle("a".into())));
        assert!(!issues.iter().any(FlowIssue::is_error));
    }
}
