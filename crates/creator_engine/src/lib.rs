//! # Creator Engine
//!
//! The render engine as seen from the session layer.
//!
//! The engine itself (shaders, buffers, camera) lives outside this
//! workspace; this crate defines the narrow contract the session layer
//! drives, plus:
//!
//! - [`Readiness`] - a signal the engine raises when a scene load may proceed
//! - [`HeadlessEngine`] - a reference engine that mirrors scene state without a GPU
//! - [`RenderLoop`] - fixed-cadence `draw` driver, independent of the session
//!
//! ## Contract
//!
//! ```text
//! init(surface) → init_default_scene(name) → [ready() → load_scene(record)]*
//!                                           → toggles / set_material_color
//! draw(surface) every frame interval (render loop)
//! ```

pub mod engine;
pub mod headless;
pub mod readiness;
pub mod render_loop;

pub use engine::{Engine, EngineError, EngineResult};
pub use headless::{EngineScene, HeadlessEngine};
pub use readiness::Readiness;
pub use render_loop::RenderLoop;
