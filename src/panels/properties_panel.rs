use egui::{Color32, RichText};

use crate::FlowBuilderApp;
use crate::flow::{
    ActionId, Animation, ConnectionId, NewAction, NewConnection, PropertyEdit, ScreenId,
    ScreenLayout, ScreenSize, ScreenUpdate,
};
use crate::renderer::{parse_hex_color, to_hex_color};

/// A change requested from the panel, applied once the UI pass is done
#[derive(Debug)]
enum PanelChange {
    Edit(PropertyEdit),
    SetStart(bool),
    AddAction(ScreenId),
    RemoveAction(ActionId),
    Connect(ScreenId),
    Disconnect(ConnectionId),
    Delete,
}

pub fn properties_panel(app: &mut FlowBuilderApp, ctx: &egui::Context) {
    if !app.config.properties_panel_open {
        return;
    }

    // Snapshot what the panel shows so the store is not locked while drawing
    let snapshot = {
        let store = app.store.read();
        let flow = store.flow();
        store.selected_screen().map(|screen| {
            let others: Vec<(ScreenId, String)> = flow
                .screens
                .iter()
                .filter(|other| other.id != screen.id)
                .map(|other| (other.id.clone(), other.properties.title.clone()))
                .collect();
            let actions: Vec<(ActionId, String)> = screen
                .actions
                .iter()
                .map(|action| {
                    let target = match (&action.target_screen_id, flow.resolve_action_target(action)) {
                        (_, Some(target)) => target.properties.title.clone(),
                        (Some(_), None) => "missing screen".to_owned(),
                        (None, None) => "no target".to_owned(),
                    };
                    (action.id.clone(), format!("{} → {}", action.trigger.label(), target))
                })
                .collect();
            let outgoing: Vec<(ConnectionId, String)> = flow
                .outgoing(&screen.id)
                .map(|conn| {
                    let target = flow
                        .screen(&conn.to_screen_id)
                        .map_or("missing screen", |target| target.properties.title.as_str());
                    let text = match &conn.label {
                        Some(label) => format!("→ {target} ({label})"),
                        None => format!("→ {target}"),
                    };
                    (conn.id.clone(), text)
                })
                .collect();
            (screen.clone(), others, actions, outgoing)
        })
    };

    let mut changes = Vec::new();

    egui::SidePanel::right("properties_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading("Properties");
            ui.separator();

            let Some((screen, others, actions, outgoing)) = &snapshot else {
                ui.weak("Select a screen on the canvas to edit it");
                return;
            };

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(screen.screen_type.label()).strong());
                    ui.weak(screen.id.as_str());
                });
                let mut is_start = screen.is_start();
                if ui.checkbox(&mut is_start, "Start screen").changed() {
                    changes.push(PanelChange::SetStart(is_start));
                }

                ui.add_space(6.0);
                content_section(ui, screen, &mut changes);
                ui.add_space(6.0);
                appearance_section(ui, screen, &mut changes);
                ui.add_space(6.0);

                egui::CollapsingHeader::new("Actions")
                    .default_open(true)
                    .show(ui, |ui| {
                        if actions.is_empty() {
                            ui.weak("No actions");
                        }
                        for (action_id, text) in actions {
                            ui.horizontal(|ui| {
                                ui.label(text);
                                if ui.small_button("✕").clicked() {
                                    changes.push(PanelChange::RemoveAction(action_id.clone()));
                                }
                            });
                        }
                        ui.menu_button("+ Click action", |ui| {
                            if others.is_empty() {
                                ui.weak("No other screens");
                            }
                            for (target, title) in others {
                                if ui.button(title).clicked() {
                                    changes.push(PanelChange::AddAction(target.clone()));
                                    ui.close_menu();
                                }
                            }
                        });
                    });

                egui::CollapsingHeader::new("Connections")
                    .default_open(true)
                    .show(ui, |ui| {
                        if outgoing.is_empty() {
                            ui.weak("No outgoing connections");
                        }
                        for (connection_id, text) in outgoing {
                            ui.horizontal(|ui| {
                                ui.label(text);
                                if ui.small_button("✕").clicked() {
                                    changes.push(PanelChange::Disconnect(connection_id.clone()));
                                }
                            });
                        }
                        ui.menu_button("+ Connect to", |ui| {
                            if others.is_empty() {
                                ui.weak("No other screens");
                            }
                            for (target, title) in others {
                                if ui.button(title).clicked() {
                                    changes.push(PanelChange::Connect(target.clone()));
                                    ui.close_menu();
                                }
                            }
                        });
                    });

                ui.add_space(12.0);
                let delete = egui::Button::new(RichText::new("Delete screen").color(Color32::WHITE))
                    .fill(Color32::from_rgb(220, 38, 38));
                if ui.add(delete).clicked() {
                    changes.push(PanelChange::Delete);
                }
            });
        });

    let Some((screen, ..)) = snapshot else {
        return;
    };
    for change in changes {
        apply_change(app, &screen.id, change);
    }
}

fn apply_change(app: &mut FlowBuilderApp, screen_id: &ScreenId, change: PanelChange) {
    match change {
        PanelChange::Edit(edit) => app.store.write().edit_property(screen_id, edit),
        PanelChange::SetStart(is_start) => app.store.write().update_screen(
            screen_id,
            ScreenUpdate {
                is_start_screen: Some(is_start),
                ..Default::default()
            },
        ),
        PanelChange::AddAction(target) => {
            app.store.write().add_action(screen_id, NewAction::click_to(target));
        }
        PanelChange::RemoveAction(action_id) => app.store.write().remove_action(screen_id, &action_id),
        PanelChange::Connect(target) => {
            app.store
                .write()
                .add_connection(NewConnection::between(screen_id.clone(), target));
        }
        PanelChange::Disconnect(connection_id) => app.store.write().delete_connection(&connection_id),
        PanelChange::Delete => app.request_delete(screen_id.clone()),
    }
}

fn content_section(ui: &mut egui::Ui, screen: &crate::flow::Screen, changes: &mut Vec<PanelChange>) {
    let props = &screen.properties;
    egui::CollapsingHeader::new("Content")
        .default_open(true)
        .show(ui, |ui| {
            ui.label("Title");
            let mut title = props.title.clone();
            if ui.text_edit_singleline(&mut title).changed() {
                changes.push(PanelChange::Edit(PropertyEdit::Title(title)));
            }

            ui.label("Description");
            let mut description = props.description.clone();
            if ui.text_edit_multiline(&mut description).changed() {
                changes.push(PanelChange::Edit(PropertyEdit::Description(description)));
            }

            ui.label("Button text");
            let mut button_text = props.button_text.clone();
            if ui.text_edit_singleline(&mut button_text).changed() {
                changes.push(PanelChange::Edit(PropertyEdit::ButtonText(button_text)));
            }

            ui.label("Secondary button");
            let mut secondary = props.secondary_button_text.clone().unwrap_or_default();
            if ui.text_edit_singleline(&mut secondary).changed() {
                changes.push(PanelChange::Edit(PropertyEdit::SecondaryButtonText(Some(secondary))));
            }
        });
}

fn appearance_section(ui: &mut egui::Ui, screen: &crate::flow::Screen, changes: &mut Vec<PanelChange>) {
    let props = &screen.properties;
    egui::CollapsingHeader::new("Appearance")
        .default_open(false)
        .show(ui, |ui| {
            let mut layout = props.layout;
            egui::ComboBox::from_label("Layout")
                .selected_text(layout.label())
                .show_ui(ui, |ui| {
                    for option in ScreenLayout::ALL {
                        ui.selectable_value(&mut layout, option, option.label());
                    }
                });
            if layout != props.layout {
                changes.push(PanelChange::Edit(PropertyEdit::Layout(layout)));
            }

            let mut size = props.size;
            egui::ComboBox::from_label("Size")
                .selected_text(size.label())
                .show_ui(ui, |ui| {
                    for option in ScreenSize::ALL {
                        ui.selectable_value(&mut size, option, option.label());
                    }
                });
            if size != props.size {
                changes.push(PanelChange::Edit(PropertyEdit::Size(size)));
            }

            let mut animation = props.style.animation;
            egui::ComboBox::from_label("Animation")
                .selected_text(animation.label())
                .show_ui(ui, |ui| {
                    for option in Animation::ALL {
                        ui.selectable_value(&mut animation, option, option.label());
                    }
                });
            if animation != props.style.animation {
                changes.push(PanelChange::Edit(PropertyEdit::Animation(animation)));
            }

            if let Some(color) = color_row(ui, "Background", &props.style.background_color) {
                changes.push(PanelChange::Edit(PropertyEdit::BackgroundColor(color)));
            }
            if let Some(color) = color_row(ui, "Text", &props.style.text_color) {
                changes.push(PanelChange::Edit(PropertyEdit::TextColor(color)));
            }
            if let Some(color) = color_row(ui, "Button", &props.style.button_color) {
                changes.push(PanelChange::Edit(PropertyEdit::ButtonColor(color)));
            }

            let mut radius = props.style.border_radius;
            if ui
                .add(egui::Slider::new(&mut radius, 0.0..=24.0).text("Border radius"))
                .changed()
            {
                changes.push(PanelChange::Edit(PropertyEdit::BorderRadius(radius)));
            }
        });
}

/// Color picker plus the raw string, since colors are stored as free text.
fn color_row(ui: &mut egui::Ui, label: &str, value: &str) -> Option<String> {
    let mut result = None;
    ui.horizontal(|ui| {
        ui.label(label);
        let mut color = parse_hex_color(value).unwrap_or(Color32::WHITE);
        if ui.color_edit_button_srgba(&mut color).changed() {
            result = Some(to_hex_color(color));
        }
        let mut text = value.to_owned();
        if ui
            .add(egui::TextEdit::singleline(&mut text).desired_width(90.0))
            .changed()
        {
            result = Some(text);
        }
    });
    result
}
