use std::time::Duration;

use egui::{Align2, Color32, RichText};

use crate::FlowBuilderApp;
use crate::flow::Screen;
use crate::renderer::parse_hex_color;
use crate::util::time;

/// Steps through the flow's screens in list order.
pub fn preview_window(app: &mut FlowBuilderApp, ctx: &egui::Context) {
    let Some(session) = app.preview.as_mut() else {
        return;
    };

    let store = app.store.read();
    let flow = store.flow();
    let len = flow.screens.len();
    let now = time::current_time_secs();

    session.tick(len, now, app.config.preview_auto_advance_secs);
    if session.is_playing() {
        ctx.request_repaint_after(Duration::from_millis(100));
    }

    let mut open = true;
    egui::Window::new("Preview")
        .open(&mut open)
        .collapsible(false)
        .default_width(380.0)
        .pivot(Align2::CENTER_CENTER)
        .default_pos(ctx.screen_rect().center())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(&flow.name);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(session.progress_label(len));
                });
            });
            ui.separator();

            match session.current_screen(flow) {
                Some(screen) => {
                    if preview_card(ui, screen) {
                        session.next(len, now);
                    }
                }
                None => {
                    ui.weak("Add some screens to preview the flow");
                }
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(session.can_go_previous(len), egui::Button::new("◀ Previous"))
                    .clicked()
                {
                    session.previous(len, now);
                }
                let play_label = if session.is_playing() { "⏸ Pause" } else { "▶ Play" };
                if ui.add_enabled(len > 1, egui::Button::new(play_label)).clicked() {
                    session.toggle_play(now);
                }
                if ui
                    .add_enabled(session.can_go_next(len), egui::Button::new("Next ▶"))
                    .clicked()
                {
                    session.next(len, now);
                }
            });
        });

    drop(store);
    if !open {
        app.close_preview();
    }
}

/// Draws one screen the way an end user would see it. Returns true when its
/// primary button was pressed.
fn preview_card(ui: &mut egui::Ui, screen: &Screen) -> bool {
    let style = &screen.properties.style;
    let fill = parse_hex_color(&style.background_color).unwrap_or(Color32::WHITE);
    let text = parse_hex_color(&style.text_color).unwrap_or(Color32::DARK_GRAY);
    let button = parse_hex_color(&style.button_color).unwrap_or(Color32::from_rgb(59, 130, 246));

    let mut pressed = false;
    egui::Frame::none()
        .fill(fill)
        .rounding(style.border_radius)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(&screen.properties.title).heading().color(text));
            ui.label(RichText::new(&screen.properties.description).color(text));
            ui.add_space(12.0);

            let primary = egui::Button::new(RichText::new(&screen.properties.button_text).color(Color32::WHITE))
                .fill(button);
            pressed = ui.add(primary).clicked();
            if let Some(secondary) = &screen.properties.secondary_button_text {
                ui.label(RichText::new(secondary).color(text).underline());
            }
        });
    ui.weak(format!(
        "{} · {} · {}",
        screen.properties.layout.label(),
        screen.properties.size.label(),
        style.animation.label()
    ));
    pressed
}

pub fn delete_confirm_window(app: &mut FlowBuilderApp, ctx: &egui::Context) {
    let Some(screen_id) = app.pending_delete.clone() else {
        return;
    };

    let (title, connections) = {
        let store = app.store.read();
        let flow = store.flow();
        let Some(screen) = flow.screen(&screen_id) else {
            // Gone already
            drop(store);
            app.cancel_delete();
            return;
        };
        let connections = flow
            .connections
            .iter()
            .filter(|conn| conn.touches(&screen_id))
            .count();
        (screen.properties.title.clone(), connections)
    };

    let mut confirmed = false;
    let mut cancelled = false;
    egui::Window::new("Delete screen")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Delete \"{title}\"?"));
            if connections > 0 {
                ui.weak(format!("{connections} connection(s) will be removed with it."));
            }
            ui.horizontal(|ui| {
                confirmed = ui.button("Delete").clicked();
                cancelled = ui.button("Cancel").clicked();
            });
        });

    if confirmed {
        app.confirm_delete();
    } else if cancelled || ctx.input(|input| input.key_pressed(egui::Key::Escape)) {
        app.cancel_delete();
    }
}

/// Shows the exported flow as JSON.
pub fn debug_window(app: &mut FlowBuilderApp, ctx: &egui::Context) {
    let store = app.store.clone();
    egui::Window::new("Flow Snapshot")
        .open(&mut app.show_debug)
        .default_width(420.0)
        .default_height(480.0)
        .show(ctx, |ui| {
            let snapshot = store.read().export_flow();
            ui.label(format!(
                "{} screens, {} connections, updated at {}",
                snapshot.screens.len(),
                snapshot.connections.len(),
                snapshot.updated_at
            ));
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| match snapshot.to_json_pretty() {
                Ok(json) => {
                    ui.monospace(json);
                }
                Err(err) => {
                    ui.colored_label(Color32::from_rgb(220, 38, 38), format!("Could not serialize flow: {err}"));
                }
            });
        });
}
