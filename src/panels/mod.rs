mod canvas_panel;
mod properties_panel;
mod screens_panel;
mod toolbar;
mod windows;

pub use canvas_panel::canvas_panel;
pub use properties_panel::properties_panel;
pub use screens_panel::screens_panel;
pub use toolbar::toolbar;
pub use windows::{debug_window, delete_confirm_window, preview_window};

/// Which list the left sidebar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarTab {
    #[default]
    Templates,
    Screens,
}
