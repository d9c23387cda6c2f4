use crate::FlowBuilderApp;
use crate::input::InputEvent;
use crate::renderer;

pub fn canvas_panel(app: &mut FlowBuilderApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .drag_to_scroll(false)
                .show(ui, |ui| {
                    let size = renderer::canvas_size(app.store.read().flow(), ui.available_size());
                    let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());

                    let origin = response.rect.min;
                    let visible = ui.clip_rect().intersect(response.rect);
                    app.input.set_canvas_geometry(visible, origin);

                    let events = app.input.process_input(ctx, app.store.read().flow());

                    // Presses over floating windows or panels belong to them
                    let over_canvas = response.contains_pointer();
                    {
                        let mut store = app.store.write();
                        for event in &events {
                            let starts_here = matches!(
                                event,
                                InputEvent::PointerDown { .. } | InputEvent::Click { .. }
                            );
                            if starts_here && !over_canvas {
                                continue;
                            }
                            app.canvas.handle_event(event, &mut store);
                        }
                    }

                    if app.canvas.is_dragging() {
                        ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
                    }

                    let store = app.store.read();
                    app.renderer.render(
                        &painter.with_clip_rect(visible),
                        origin,
                        store.flow(),
                        store.selected_screen_id(),
                        app.canvas.dragged_screen(),
                    );
                });
        });
}
