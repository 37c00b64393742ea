//! Engine interop contract

use std::rc::Rc;

use async_trait::async_trait;
use creator_scene::{MaterialAxis, Rgba, SceneRecord};
use thiserror::Error;

/// Engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Surface not found: {0}")]
    SurfaceNotFound(String),

    #[error("Engine not initialized")]
    NotInitialized,

    #[error("Engine rejected {0}")]
    Rejected(String),

    #[error("Resource allocation failed: {0}")]
    Resource(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Scene-level operations exposed by the render engine.
///
/// Any async call may suspend while the engine works. The engine is a
/// singleton used from one thread; it does no locking of its own.
#[async_trait(?Send)]
pub trait Engine {
    /// Bind the engine to a named output surface
    async fn init(&self, surface_id: &str) -> EngineResult<()>;

    /// Materialise the built-in default scene under `name` and make it current
    async fn init_default_scene(&self, name: &str) -> EngineResult<()>;

    /// Whether a scene is currently loaded
    fn has_current_scene(&self) -> bool;

    /// Resolves once the engine can accept a scene load
    async fn ready(&self) -> EngineResult<()>;

    /// Replace the current scene with `record`
    async fn load_scene(&self, record: &SceneRecord) -> EngineResult<()>;

    async fn set_material_color(&self, color: Rgba) -> EngineResult<()>;

    async fn toggle_material_axis(&self, axis: MaterialAxis) -> EngineResult<()>;

    async fn toggle_selection_shape(&self) -> EngineResult<()>;

    async fn toggle_grid(&self) -> EngineResult<()>;

    /// Render one frame. Called by the render loop, never by the session.
    fn draw(&self, surface_id: &str) -> EngineResult<()>;
}

#[async_trait(?Send)]
impl<E: Engine + ?Sized> Engine for Rc<E> {
    async fn init(&self, surface_id: &str) -> EngineResult<()> {
        (**self).init(surface_id).await
    }

    async fn init_default_scene(&self, name: &str) -> EngineResult<()> {
        (**self).init_default_scene(name).await
    }

    fn has_current_scene(&self) -> bool {
        (**self).has_current_scene()
    }

    async fn ready(&self) -> EngineResult<()> {
        (**self).ready().await
    }

    async fn load_scene(&self, record: &SceneRecord) -> EngineResult<()> {
        (**self).load_scene(record).await
    }

    async fn set_material_color(&self, color: Rgba) -> EngineResult<()> {
        (**self).set_material_color(color).await
    }

    async fn toggle_material_axis(&self, axis: MaterialAxis) -> EngineResult<()> {
        (**self).toggle_material_axis(axis).await
    }

    async fn toggle_selection_shape(&self) -> EngineResult<()> {
        (**self).toggle_selection_shape().await
    }

    async fn toggle_grid(&self) -> EngineResult<()> {
        (**self).toggle_grid().await
    }

    fn draw(&self, surface_id: &str) -> EngineResult<()> {
        (**self).draw(surface_id)
    }
}
