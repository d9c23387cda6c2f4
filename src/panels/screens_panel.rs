use egui::{Color32, RichText};

use super::SidebarTab;
use crate::FlowBuilderApp;
use crate::flow::{self, SCREEN_TEMPLATES, template_of};
use crate::renderer::accent_color;

pub fn screens_panel(app: &mut FlowBuilderApp, ctx: &egui::Context) {
    egui::SidePanel::left("screens_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut app.sidebar_tab, SidebarTab::Templates, "Templates");
                ui.selectable_value(&mut app.sidebar_tab, SidebarTab::Screens, "Screens");
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match app.sidebar_tab {
                SidebarTab::Templates => templates_tab(app, ui),
                SidebarTab::Screens => screens_tab(app, ui),
            });
        });
}

fn templates_tab(app: &mut FlowBuilderApp, ui: &mut egui::Ui) {
    ui.label("Click a template to add it to the canvas");
    ui.add_space(4.0);

    for template in &SCREEN_TEMPLATES {
        let accent = accent_color(template.screen_type);
        let response = ui
            .group(|ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(template.title).strong().color(accent));
                ui.weak(template.description);
            })
            .response
            .interact(egui::Sense::click());

        if response.clicked() {
            let id = app.store.write().add_screen(template.new_screen());
            log::info!("added {} from template", id);
        }
    }
}

fn screens_tab(app: &mut FlowBuilderApp, ui: &mut egui::Ui) {
    let mut clicked = None;
    let issues = {
        let store = app.store.read();
        let flow = store.flow();

        if flow.screens.is_empty() {
            ui.weak("No screens yet");
        }
        for screen in &flow.screens {
            let selected = store.selected_screen_id() == Some(&screen.id);
            let template = template_of(screen);
            let mut text = RichText::new(format!("{}  ·  {}", screen.properties.title, template.title));
            if screen.is_start() {
                text = text.strong();
            }
            if ui.selectable_label(selected, text).clicked() {
                clicked = Some(screen.id.clone());
            }
        }

        flow::validate(flow)
    };

    if let Some(id) = clicked {
        app.store.write().set_selected_screen(Some(id));
    }

    ui.add_space(8.0);
    egui::CollapsingHeader::new(format!("Flow check ({})", issues.len()))
        .default_open(false)
        .show(ui, |ui| {
            if issues.is_empty() {
                ui.label("No issues found");
            }
            for issue in &issues {
                let color = if issue.is_error() {
                    Color32::from_rgb(220, 38, 38)
                } else {
                    Color32::from_rgb(202, 138, 4)
                };
                ui.colored_label(color, issue.to_string());
            }
        });
}
