use crate::FlowBuilderApp;
use crate::config::SeedFlow;

pub fn toolbar(app: &mut FlowBuilderApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            {
                let store = app.store.read();
                let flow = store.flow();
                ui.strong(&flow.name);
                ui.weak(format!("{} screens", flow.screens.len()));
            }

            ui.separator();

            // History and sharing are not wired up yet
            if ui.button("Undo").clicked() {
                log::info!("undo is not available");
            }
            if ui.button("Redo").clicked() {
                log::info!("redo is not available");
            }

            ui.separator();

            if ui.button("▶ Preview").clicked() {
                app.open_preview();
            }
            if ui.button("Export").clicked() {
                log::info!("export is not available");
            }
            if ui.button("Share").clicked() {
                log::info!("share is not available");
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.toggle_value(&mut app.show_debug, "Debug");
                ui.toggle_value(&mut app.config.properties_panel_open, "Properties");

                ui.menu_button("Settings", |ui| {
                    ui.checkbox(&mut app.config.show_grid, "Show grid");
                    ui.checkbox(&mut app.config.confirm_deletes, "Confirm before deleting");
                    ui.add(
                        egui::Slider::new(&mut app.config.preview_auto_advance_secs, 1.0..=10.0)
                            .text("Preview seconds per screen"),
                    );
                    ui.separator();
                    ui.label("Next session starts with");
                    ui.radio_value(&mut app.config.seed, SeedFlow::Demo, "Demo flow");
                    ui.radio_value(&mut app.config.seed, SeedFlow::Empty, "Empty flow");
                });
            });
        });
    });
}
