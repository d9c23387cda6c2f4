use serde::{Deserialize, Serialize};

use crate::flow::{FlowData, demo_flow};

/// Storage key for editor preferences
pub const CONFIG_KEY: &str = "flow_builder_config";

/// Which flow a new session starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeedFlow {
    Empty,
    #[default]
    Demo,
}

impl SeedFlow {
    pub fn build(self) -> FlowData {
        match self {
            SeedFlow::Empty => FlowData::default(),
            SeedFlow::Demo => demo_flow(),
        }
    }
}

/// Editor preferences, restored from eframe storage between runs.
/// The flow itself is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorConfig {
    pub seed: SeedFlow,
    pub show_grid: bool,
    pub properties_panel_open: bool,
    /// Ask before deleting a screen
    pub confirm_deletes: bool,
    /// Seconds each screen stays up while the preview is playing
    pub preview_auto_advance_secs: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            seed: SeedFlow::Demo,
            show_grid: true,
            properties_panel_open: true,
            confirm_deletes: true,
            preview_auto_advance_secs: 3.0,
        }
    }
}

impl EditorConfig {
    /// Loads preferences, falling back to defaults for anything missing.
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| eframe::get_value(storage, CONFIG_KEY))
            .unwrap_or_default()
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CONFIG_KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"show_grid": false}"#).unwrap();
        assert!(!config.show_grid);
        assert_eq!(config.seed, SeedFlow::Demo);
        assert!(config.confirm_deletes);
    }

    #[test]
    fn seeds_build_expected_flows() {
        assert!(SeedFlow::Empty.build().screens.is_empty());
        assert_eq!(SeedFlow::Demo.build().screens.len(), 4);
    }
}
