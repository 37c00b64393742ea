//! Session configuration

use serde::{Deserialize, Serialize};

/// Session settings. Every field has a default, so partial config
/// files are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Output surface the engine binds to
    pub surface_id: String,
    /// Scene loaded at startup when present; also the name of the
    /// engine's default scene
    pub default_scene_name: String,
    /// Label of the "nothing selected" entry in the scene selector
    pub none_label: String,
    /// Maximum retained diagnostic entries
    pub diagnostics_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            surface_id: "scene".to_string(),
            default_scene_name: "Default".to_string(),
            none_label: "none".to_string(),
            diagnostics_capacity: 64,
        }
    }
}

impl SessionConfig {
    pub fn with_surface(mut self, surface_id: impl Into<String>) -> Self {
        self.surface_id = surface_id.into();
        self
    }

    pub fn with_default_scene(mut self, name: impl Into<String>) -> Self {
        self.default_scene_name = name.into();
        self
    }
}
