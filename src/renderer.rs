// src/renderer.rs
use egui::epaint::CubicBezierShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Shape, Stroke, Vec2, pos2, vec2};

use crate::canvas::geometry::{self, NODE_SIZE};
use crate::flow::{Connection, FlowData, Screen, ScreenId, ScreenType};

const GRID_SPACING: f32 = 20.0;
const HEADER_HEIGHT: f32 = 40.0;
const DRAG_SCALE: f32 = 1.05;

pub const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(241, 245, 249);
pub const GRID_DOT: Color32 = Color32::from_rgb(203, 213, 225);
pub const CONNECTION_COLOR: Color32 = Color32::from_rgb(96, 165, 250);
pub const SELECTION_COLOR: Color32 = Color32::from_rgb(59, 130, 246);
pub const BORDER_COLOR: Color32 = Color32::from_rgb(226, 232, 240);
pub const MUTED_TEXT: Color32 = Color32::from_rgb(100, 116, 139);

/// Accent used for a screen type's header band and palette icon
pub fn accent_color(screen_type: ScreenType) -> Color32 {
    match screen_type {
        ScreenType::Welcome => Color32::from_rgb(59, 130, 246),
        ScreenType::Feature => Color32::from_rgb(168, 85, 247),
        ScreenType::Form => Color32::from_rgb(34, 197, 94),
        ScreenType::Tutorial => Color32::from_rgb(249, 115, 22),
        ScreenType::Success => Color32::from_rgb(16, 185, 129),
    }
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`. Anything else yields `None`.
pub fn parse_hex_color(text: &str) -> Option<Color32> {
    let hex = text.trim().strip_prefix('#')?;
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    match hex.len() {
        3 => {
            let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
            Some(Color32::from_rgb(short(0)?, short(1)?, short(2)?))
        }
        6 => Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => None,
    }
}

pub fn to_hex_color(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Where a screen node is drawn, in screen coordinates. The dragged node is
/// drawn slightly enlarged.
pub fn node_screen_rect(screen: &Screen, origin: Pos2, dragging: bool) -> Rect {
    let rect = geometry::node_rect(screen.position).translate(origin.to_vec2());
    if dragging {
        Rect::from_center_size(rect.center(), rect.size() * DRAG_SCALE)
    } else {
        rect
    }
}

/// Paints the flow canvas: grid, connections, then screen nodes.
#[derive(Debug, Clone)]
pub struct FlowRenderer {
    pub show_grid: bool,
}

impl Default for FlowRenderer {
    fn default() -> Self {
        Self { show_grid: true }
    }
}

impl FlowRenderer {
    pub fn new(show_grid: bool) -> Self {
        Self { show_grid }
    }

    /// Renders the whole canvas
    ///
    /// Args:
    ///     painter: clipped to the visible canvas area
    ///     origin: screen position of canvas coordinate (0, 0)
    pub fn render(
        &self,
        painter: &Painter,
        origin: Pos2,
        flow: &FlowData,
        selected: Option<&ScreenId>,
        dragging: Option<&ScreenId>,
    ) {
        let visible = painter.clip_rect();
        painter.rect_filled(visible, 0.0, CANVAS_BACKGROUND);

        if self.show_grid {
            self.render_grid(painter, visible, origin);
        }

        for connection in &flow.connections {
            self.render_connection(painter, origin, flow, connection);
        }

        for screen in &flow.screens {
            let is_dragged = dragging == Some(&screen.id);
            let is_selected = selected == Some(&screen.id);
            self.render_node(painter, origin, screen, is_selected, is_dragged);
        }

        if flow.screens.is_empty() {
            self.render_empty_state(painter, visible);
        }
    }

    fn render_grid(&self, painter: &Painter, visible: Rect, origin: Pos2) {
        let first_x = origin.x + ((visible.min.x - origin.x) / GRID_SPACING).ceil() * GRID_SPACING;
        let first_y = origin.y + ((visible.min.y - origin.y) / GRID_SPACING).ceil() * GRID_SPACING;

        let mut y = first_y;
        while y < visible.max.y {
            let mut x = first_x;
            while x < visible.max.x {
                painter.circle_filled(pos2(x, y), 1.0, GRID_DOT);
                x += GRID_SPACING;
            }
            y += GRID_SPACING;
        }
    }

    fn render_connection(&self, painter: &Painter, origin: Pos2, flow: &FlowData, connection: &Connection) {
        // Dangling endpoints are simply not drawn
        let Some((from_screen, to_screen)) = flow.resolve_connection(connection) else {
            return;
        };
        let from = geometry::connection_anchor(from_screen.position) + origin.to_vec2();
        let to = geometry::connection_anchor(to_screen.position) + origin.to_vec2();

        let points = geometry::connection_curve(from, to);
        let stroke = Stroke::new(2.0, CONNECTION_COLOR);
        painter.add(CubicBezierShape::from_points_stroke(
            points,
            false,
            Color32::TRANSPARENT,
            stroke,
        ));

        // Vertical links have coincident end control points; fall back to the chord
        let direction = [points[3] - points[2], to - from]
            .into_iter()
            .map(Vec2::normalized)
            .find(|dir| dir.is_finite() && *dir != Vec2::ZERO)
            .unwrap_or(Vec2::X);
        let normal = direction.rot90();
        let tip = to;
        let base = tip - direction * 10.0;
        painter.add(Shape::convex_polygon(
            vec![tip, base + normal * 3.5, base - normal * 3.5],
            CONNECTION_COLOR,
            Stroke::NONE,
        ));

        if let Some(label) = &connection.label {
            let anchor = geometry::label_anchor(from, to);
            let pill = Rect::from_center_size(anchor, vec2(60.0, 20.0));
            painter.rect_filled(pill, 10.0, Color32::WHITE);
            painter.rect_stroke(pill, 10.0, Stroke::new(1.0, BORDER_COLOR));
            painter.text(anchor, Align2::CENTER_CENTER, label, FontId::proportional(10.0), MUTED_TEXT);
        }
    }

    fn render_node(&self, painter: &Painter, origin: Pos2, screen: &Screen, selected: bool, dragged: bool) {
        let rect = node_screen_rect(screen, origin, dragged);
        let style = &screen.properties.style;
        let radius = style.border_radius.clamp(0.0, 24.0);
        let fill = parse_hex_color(&style.background_color).unwrap_or(Color32::WHITE);
        let text_color = parse_hex_color(&style.text_color).unwrap_or(Color32::DARK_GRAY);
        let button_color = parse_hex_color(&style.button_color).unwrap_or(SELECTION_COLOR);
        let accent = accent_color(screen.screen_type);

        if dragged {
            painter.rect_filled(rect.translate(vec2(0.0, 6.0)), radius, Color32::from_black_alpha(40));
        }
        painter.rect_filled(rect, radius, fill);

        let header = Rect::from_min_size(rect.min, vec2(rect.width(), HEADER_HEIGHT));
        painter.rect_filled(
            header,
            Rounding {
                nw: radius,
                ne: radius,
                sw: 0.0,
                se: 0.0,
            },
            accent,
        );
        painter.text(
            header.left_center() + vec2(12.0, 0.0),
            Align2::LEFT_CENTER,
            screen.screen_type.label().to_uppercase(),
            FontId::proportional(12.0),
            Color32::WHITE,
        );
        if screen.is_start() {
            painter.text(
                header.right_center() - vec2(12.0, 0.0),
                Align2::RIGHT_CENTER,
                "START",
                FontId::proportional(11.0),
                Color32::WHITE,
            );
        }

        let body = rect.shrink2(vec2(12.0, 0.0));
        let title_pos = pos2(body.min.x, header.max.y + 10.0);
        let title_rect = painter.text(
            title_pos,
            Align2::LEFT_TOP,
            &screen.properties.title,
            FontId::proportional(16.0),
            text_color,
        );

        let galley = painter.layout(
            screen.properties.description.clone(),
            FontId::proportional(12.0),
            text_color.gamma_multiply(0.75),
            body.width(),
        );
        painter.galley(pos2(body.min.x, title_rect.max.y + 6.0), galley, text_color);

        let button = Rect::from_min_size(
            pos2(body.min.x, rect.max.y - 40.0),
            vec2(body.width(), 28.0),
        );
        painter.rect_filled(button, 6.0, button_color);
        painter.text(
            button.center(),
            Align2::CENTER_CENTER,
            &screen.properties.button_text,
            FontId::proportional(12.0),
            Color32::WHITE,
        );

        let border = if selected {
            Stroke::new(2.0, SELECTION_COLOR)
        } else {
            Stroke::new(1.0, BORDER_COLOR)
        };
        painter.rect_stroke(rect, radius, border);
    }

    fn render_empty_state(&self, painter: &Painter, visible: Rect) {
        let center = visible.center();
        painter.text(
            center - vec2(0.0, 14.0),
            Align2::CENTER_CENTER,
            "Start Building Your Flow",
            FontId::proportional(18.0),
            Color32::from_rgb(30, 41, 59),
        );
        painter.text(
            center + vec2(0.0, 14.0),
            Align2::CENTER_CENTER,
            "Add screen templates from the sidebar, then drag them around the canvas",
            FontId::proportional(13.0),
            MUTED_TEXT,
        );
    }
}

/// Canvas size needed for the flow, never smaller than one node.
pub fn canvas_size(flow: &FlowData, available: Vec2) -> Vec2 {
    geometry::canvas_extent(flow).max(available).max(NODE_SIZE)
}
