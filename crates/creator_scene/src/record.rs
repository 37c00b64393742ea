//! Scene record - the unit of persistence

use serde::{Deserialize, Serialize};

use crate::color::{ParseError, Rgb, Rgba, OPAQUE};
use crate::material::MaterialMode;
use crate::shape::SelectionShape;

/// Current record schema version.
///
/// Version 1 records carry no alpha channel.
pub const SCHEMA_VERSION: u32 = 2;

/// Longest accepted scene name, in bytes.
///
/// Keeps store keys usable as file names once encoded.
pub const MAX_NAME_BYTES: usize = 128;

fn default_alpha() -> u8 {
    OPAQUE
}

/// Persisted scene configuration.
///
/// `name` is the store key; writing a record under an existing name
/// replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub name: String,
    pub selection_shape: SelectionShape,
    pub material_mode: MaterialMode,
    pub color: Rgb,
    #[serde(default = "default_alpha")]
    pub alpha: u8,
    pub grid_visible: bool,
}

impl SceneRecord {
    /// Create a record with default scene state
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selection_shape: SelectionShape::default(),
            material_mode: MaterialMode::default(),
            color: Rgb::default(),
            alpha: OPAQUE,
            grid_visible: true,
        }
    }

    pub fn with_shape(mut self, shape: SelectionShape) -> Self {
        self.selection_shape = shape;
        self
    }

    pub fn with_material(mut self, mode: MaterialMode) -> Self {
        self.material_mode = mode;
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color.rgb();
        self.alpha = color.a;
        self
    }

    pub fn with_grid(mut self, visible: bool) -> Self {
        self.grid_visible = visible;
        self
    }

    pub fn rgba(&self) -> Rgba {
        self.color.with_alpha(self.alpha)
    }
}

/// Reject names that cannot be used as store keys
pub fn validate_name(name: &str) -> Result<(), ParseError> {
    if name.trim().is_empty() {
        return Err(ParseError::EmptyName);
    }
    if name.len() > MAX_NAME_BYTES {
        return Err(ParseError::NameTooLong {
            len: name.len(),
            max: MAX_NAME_BYTES,
        });
    }
    Ok(())
}
