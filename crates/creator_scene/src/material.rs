//! Material mode
//!
//! Two independent binary axes: substance (solid/fluid) and shading
//! (noise/smooth). A toggle flips exactly one axis.

use serde::{Deserialize, Serialize};

/// Substance axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Substance {
    Solid,
    Fluid,
}

impl Substance {
    pub fn flipped(&self) -> Self {
        match self {
            Substance::Solid => Substance::Fluid,
            Substance::Fluid => Substance::Solid,
        }
    }
}

/// Shading axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// Flat colour perturbed by noise
    Noise,
    Smooth,
}

impl Shading {
    pub fn flipped(&self) -> Self {
        match self {
            Shading::Noise => Shading::Smooth,
            Shading::Smooth => Shading::Noise,
        }
    }
}

/// Selects one axis of the material mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialAxis {
    /// Solid / fluid
    Substance,
    /// Noise / smooth
    Shading,
}

impl MaterialAxis {
    pub fn name(&self) -> &'static str {
        match self {
            MaterialAxis::Substance => "substance",
            MaterialAxis::Shading => "shading",
        }
    }
}

/// Control offered to the user for the substance axis.
///
/// Always the opposite of the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstanceAffordance {
    Solid,
    Fluid,
}

/// Control offered to the user for the shading axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingAffordance {
    Noise,
    Smooth,
}

/// Composite material mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialMode {
    pub substance: Substance,
    pub shading: Shading,
}

impl Default for MaterialMode {
    fn default() -> Self {
        Self {
            substance: Substance::Solid,
            shading: Shading::Smooth,
        }
    }
}

impl MaterialMode {
    pub fn new(substance: Substance, shading: Shading) -> Self {
        Self { substance, shading }
    }

    /// Flip one axis, leaving the other untouched
    pub fn flipped(&self, axis: MaterialAxis) -> Self {
        match axis {
            MaterialAxis::Substance => Self {
                substance: self.substance.flipped(),
                ..*self
            },
            MaterialAxis::Shading => Self {
                shading: self.shading.flipped(),
                ..*self
            },
        }
    }

    pub fn is_fluid(&self) -> bool {
        self.substance == Substance::Fluid
    }

    pub fn substance_affordance(&self) -> SubstanceAffordance {
        match self.substance {
            Substance::Solid => SubstanceAffordance::Fluid,
            Substance::Fluid => SubstanceAffordance::Solid,
        }
    }

    pub fn shading_affordance(&self) -> ShadingAffordance {
        match self.shading {
            Shading::Smooth => ShadingAffordance::Noise,
            Shading::Noise => ShadingAffordance::Smooth,
        }
    }
}
