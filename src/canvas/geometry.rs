use egui::{Pos2, Rect, Vec2, pos2, vec2};

use crate::flow::{FlowData, ScreenId};

/// Size of a screen node on the canvas, in canvas units.
pub const NODE_SIZE: Vec2 = vec2(320.0, 200.0);

/// Where connection lines attach, relative to a node's position.
pub const CONNECTION_ANCHOR: Vec2 = vec2(150.0, 100.0);

/// Dragged nodes never go above or left of this coordinate.
pub const MIN_NODE_COORD: f32 = 10.0;

/// Empty space kept past the furthest node so it can be dragged outward.
pub const CANVAS_MARGIN: f32 = 400.0;

pub fn clamp_position(position: Pos2) -> Pos2 {
    pos2(position.x.max(MIN_NODE_COORD), position.y.max(MIN_NODE_COORD))
}

pub fn node_rect(position: Pos2) -> Rect {
    Rect::from_min_size(position, NODE_SIZE)
}

pub fn connection_anchor(position: Pos2) -> Pos2 {
    position + CONNECTION_ANCHOR
}

/// Control points of the cubic curve drawn for a connection.
pub fn connection_curve(from: Pos2, to: Pos2) -> [Pos2; 4] {
    let control_offset = (to.x - from.x).abs() * 0.5;
    [
        from,
        pos2(from.x + control_offset, from.y),
        pos2(to.x - control_offset, to.y),
        to,
    ]
}

pub fn label_anchor(from: Pos2, to: Pos2) -> Pos2 {
    from.lerp(to, 0.5)
}

/// The topmost screen under `point`. Later screens are drawn on top.
pub fn hit_test(flow: &FlowData, point: Pos2) -> Option<&ScreenId> {
    flow.screens
        .iter()
        .rev()
        .find(|screen| node_rect(screen.position).contains(point))
        .map(|screen| &screen.id)
}

/// Size the canvas must have to show every node plus a margin.
pub fn canvas_extent(flow: &FlowData) -> Vec2 {
    flow.screens.iter().fold(Vec2::ZERO, |extent, screen| {
        let max = node_rect(screen.position).max;
        extent.max(vec2(max.x, max.y) + Vec2::splat(CANVAS_MARGIN))
    })
}
