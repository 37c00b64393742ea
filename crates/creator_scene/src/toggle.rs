//! Toggle state machine
//!
//! In-memory mirror of the engine-visible toggles. Every transition is
//! synchronous; the only way to jump to an arbitrary state is
//! [`ToggleState::apply`], used when a record is loaded.

use crate::color::Rgba;
use crate::material::{MaterialAxis, MaterialMode};
use crate::record::SceneRecord;
use crate::shape::SelectionShape;

/// Grid control offered to the user.
///
/// Mirrors visibility: a visible grid offers `Hide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAffordance {
    Show,
    Hide,
}

/// Toggle state for the current scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleState {
    shape: SelectionShape,
    material: MaterialMode,
    grid_visible: bool,
}

impl Default for ToggleState {
    fn default() -> Self {
        Self {
            shape: SelectionShape::default(),
            material: MaterialMode::default(),
            grid_visible: true,
        }
    }
}

impl ToggleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(&self) -> SelectionShape {
        self.shape
    }

    pub fn material(&self) -> MaterialMode {
        self.material
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    /// Advance the selection shape one step forward
    pub fn advance_shape(&mut self) -> SelectionShape {
        self.shape = self.shape.next();
        self.shape
    }

    /// Flip a single material axis
    pub fn flip(&mut self, axis: MaterialAxis) -> MaterialMode {
        self.material = self.material.flipped(axis);
        self.material
    }

    /// Flip grid visibility
    pub fn flip_grid(&mut self) -> bool {
        self.grid_visible = !self.grid_visible;
        self.grid_visible
    }

    pub fn grid_affordance(&self) -> GridAffordance {
        if self.grid_visible {
            GridAffordance::Hide
        } else {
            GridAffordance::Show
        }
    }

    /// Take over the toggles stored in a record
    pub fn apply(&mut self, record: &SceneRecord) {
        self.shape = record.selection_shape;
        self.material = record.material_mode;
        self.grid_visible = record.grid_visible;
    }

    /// Build a record from the current toggles
    pub fn snapshot(&self, name: impl Into<String>, color: Rgba) -> SceneRecord {
        SceneRecord::new(name)
            .with_shape(self.shape)
            .with_material(self.material)
            .with_color(color)
            .with_grid(self.grid_visible)
    }
}
