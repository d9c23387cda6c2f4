use crate::canvas::CanvasInteraction;
use crate::config::EditorConfig;
use crate::event::LogEventHandler;
use crate::flow::ScreenId;
use crate::input::InputHandler;
use crate::panels::{self, SidebarTab};
use crate::preview::PreviewSession;
use crate::renderer::FlowRenderer;
use crate::store::{FlowHandle, FlowStore};
use crate::util::time;

/// The editor window. Owns the UI state; the flow itself lives behind
/// [`FlowHandle`].
#[derive(Debug)]
pub struct FlowBuilderApp {
    pub(crate) store: FlowHandle,
    pub(crate) canvas: CanvasInteraction,
    pub(crate) input: InputHandler,
    pub(crate) renderer: FlowRenderer,
    pub(crate) config: EditorConfig,
    pub(crate) preview: Option<PreviewSession>,
    /// Screen waiting for the user to confirm its deletion
    pub(crate) pending_delete: Option<ScreenId>,
    pub(crate) show_debug: bool,
    pub(crate) sidebar_tab: SidebarTab,
}

impl Default for FlowBuilderApp {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl FlowBuilderApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = EditorConfig::load(cc.storage);
        log::info!("starting flow builder with {:?} seed", config.seed);
        Self::with_config(config)
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let store = FlowStore::new(config.seed.build());
        store.subscribe(Box::new(LogEventHandler));

        Self {
            store: FlowHandle::new(store),
            canvas: CanvasInteraction::new(),
            input: InputHandler::new(),
            renderer: FlowRenderer::new(config.show_grid),
            config,
            preview: None,
            pending_delete: None,
            show_debug: false,
            sidebar_tab: SidebarTab::default(),
        }
    }

    pub fn store(&self) -> &FlowHandle {
        &self.store
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn pending_delete(&self) -> Option<&ScreenId> {
        self.pending_delete.as_ref()
    }

    /// Deletes right away, or parks the id until confirmed when the
    /// preference asks for confirmation.
    pub fn request_delete(&mut self, screen_id: ScreenId) {
        if self.config.confirm_deletes {
            self.pending_delete = Some(screen_id);
        } else {
            self.store.write().delete_screen(&screen_id);
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(screen_id) = self.pending_delete.take() {
            self.store.write().delete_screen(&screen_id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn open_preview(&mut self) {
        self.preview = Some(PreviewSession::new(time::current_time_secs()));
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    pub fn is_previewing(&self) -> bool {
        self.preview.is_some()
    }
}

impl eframe::App for FlowBuilderApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.config.save(storage);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.renderer.show_grid = self.config.show_grid;

        // Side panels first so the canvas gets what is left
        panels::toolbar(self, ctx);
        panels::screens_panel(self, ctx);
        panels::properties_panel(self, ctx);
        panels::canvas_panel(self, ctx);

        panels::preview_window(self, ctx);
        panels::delete_confirm_window(self, ctx);
        panels::debug_window(self, ctx);
    }
}
