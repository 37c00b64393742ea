//! Selection shapes

use serde::{Deserialize, Serialize};

/// Geometry primitive used to highlight the selection.
///
/// The declaration order is the cycle order used by
/// [`SelectionShape::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionShape {
    Sphere,
    Cube,
    SquareXy,
    SquareXz,
    SquareYz,
    CircleXy,
    CircleXz,
    CircleYz,
}

impl Default for SelectionShape {
    fn default() -> Self {
        Self::Sphere
    }
}

impl SelectionShape {
    /// Number of shapes in the cycle
    pub const COUNT: usize = 8;

    /// All shapes in cycle order
    pub const ALL: [SelectionShape; Self::COUNT] = [
        SelectionShape::Sphere,
        SelectionShape::Cube,
        SelectionShape::SquareXy,
        SelectionShape::SquareXz,
        SelectionShape::SquareYz,
        SelectionShape::CircleXy,
        SelectionShape::CircleXz,
        SelectionShape::CircleYz,
    ];

    /// Position of this shape in the cycle
    pub fn ordinal(&self) -> usize {
        match self {
            SelectionShape::Sphere => 0,
            SelectionShape::Cube => 1,
            SelectionShape::SquareXy => 2,
            SelectionShape::SquareXz => 3,
            SelectionShape::SquareYz => 4,
            SelectionShape::CircleXy => 5,
            SelectionShape::CircleXz => 6,
            SelectionShape::CircleYz => 7,
        }
    }

    /// Successor in the cycle; wraps after the last shape.
    pub fn next(&self) -> Self {
        Self::ALL[(self.ordinal() + 1) % Self::COUNT]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SelectionShape::Sphere => "Sphere",
            SelectionShape::Cube => "Cube",
            SelectionShape::SquareXy => "Square XY",
            SelectionShape::SquareXz => "Square XZ",
            SelectionShape::SquareYz => "Square YZ",
            SelectionShape::CircleXy => "Circle XY",
            SelectionShape::CircleXz => "Circle XZ",
            SelectionShape::CircleYz => "Circle YZ",
        }
    }
}

impl std::fmt::Display for SelectionShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
