//! Creator Scene - scene data model
//!
//! This crate holds everything the editor knows about a scene without
//! touching the render engine or the persistent store.
//!
//! # Features
//!
//! - `SceneRecord`, the unit of persistence
//! - Selection shape cycle (8 shapes, forward only)
//! - Material mode as two independent binary axes
//! - Hex color and decimal channel parsing
//! - Toggle state machine mirroring engine-visible state
//! - Versioned JSON record codec
//!
//! # Example
//!
//! ```ignore
//! use creator_scene::prelude::*;
//!
//! let mut toggles = ToggleState::default();
//! toggles.advance_shape();
//! toggles.flip(MaterialAxis::Substance);
//!
//! let record = toggles.snapshot("Default", Rgba::default());
//! let json = codec::encode(&record)?;
//! ```

pub mod codec;
pub mod color;
pub mod material;
pub mod record;
pub mod shape;
pub mod toggle;

pub mod prelude {
    pub use crate::codec::{self, CodecError};
    pub use crate::color::{parse_channel, parse_hex, ParseError, Rgb, Rgba, OPAQUE};
    pub use crate::material::{
        MaterialAxis, MaterialMode, Shading, ShadingAffordance, Substance, SubstanceAffordance,
    };
    pub use crate::record::{validate_name, SceneRecord, MAX_NAME_BYTES, SCHEMA_VERSION};
    pub use crate::shape::SelectionShape;
    pub use crate::toggle::{GridAffordance, ToggleState};
}

pub use prelude::*;
