//! Headless reference engine
//!
//! Tracks everything a real engine would show on screen (current scene,
//! toggles, material colour) without rendering. Used by the native shell
//! and by tests.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use creator_scene::{MaterialAxis, Rgba, SceneRecord, ToggleState};

use crate::engine::{Engine, EngineError, EngineResult};
use crate::readiness::Readiness;

/// Engine-side view of the current scene
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineScene {
    /// Surface the engine is bound to
    pub surface: Option<String>,
    /// Name of the loaded scene, if any
    pub scene_name: Option<String>,
    pub toggles: ToggleState,
    pub color: Rgba,
}

/// Engine that mirrors scene state in memory
#[derive(Debug)]
pub struct HeadlessEngine {
    surfaces: Vec<String>,
    scene: RefCell<EngineScene>,
    readiness: Readiness,
    /// Raise readiness automatically after each scene change
    auto_ready: bool,
    frames: Cell<u64>,
}

impl HeadlessEngine {
    /// Create an engine that can bind to the given surfaces
    pub fn new<I, S>(surfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            surfaces: surfaces.into_iter().map(Into::into).collect(),
            scene: RefCell::new(EngineScene::default()),
            readiness: Readiness::new(),
            auto_ready: true,
            frames: Cell::new(0),
        }
    }

    /// Leave readiness to the caller instead of raising it after scene changes
    pub fn with_manual_readiness(mut self) -> Self {
        self.auto_ready = false;
        self
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    /// Copy of the engine-side scene state
    pub fn scene(&self) -> EngineScene {
        self.scene.borrow().clone()
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames.get()
    }

    fn require_surface(&self) -> EngineResult<()> {
        if self.scene.borrow().surface.is_none() {
            return Err(EngineError::NotInitialized);
        }
        Ok(())
    }

    fn require_scene(&self) -> EngineResult<()> {
        self.require_surface()?;
        if self.scene.borrow().scene_name.is_none() {
            return Err(EngineError::Rejected("toggle without a current scene".to_string()));
        }
        Ok(())
    }

    fn scene_changed(&self) {
        if self.auto_ready {
            self.readiness.set_ready(true);
        }
    }
}

#[async_trait(?Send)]
impl Engine for HeadlessEngine {
    async fn init(&self, surface_id: &str) -> EngineResult<()> {
        if !self.surfaces.iter().any(|s| s == surface_id) {
            return Err(EngineError::SurfaceNotFound(surface_id.to_string()));
        }
        self.scene.borrow_mut().surface = Some(surface_id.to_string());
        log::debug!("headless engine bound to {:?}", surface_id);
        Ok(())
    }

    async fn init_default_scene(&self, name: &str) -> EngineResult<()> {
        self.require_surface()?;
        {
            let mut scene = self.scene.borrow_mut();
            scene.scene_name = Some(name.to_string());
            scene.toggles = ToggleState::default();
            scene.color = Rgba::default();
        }
        self.scene_changed();
        Ok(())
    }

    fn has_current_scene(&self) -> bool {
        self.scene.borrow().scene_name.is_some()
    }

    async fn ready(&self) -> EngineResult<()> {
        self.require_surface()?;
        self.readiness.wait().await;
        Ok(())
    }

    async fn load_scene(&self, record: &SceneRecord) -> EngineResult<()> {
        self.require_surface()?;
        {
            let mut scene = self.scene.borrow_mut();
            scene.scene_name = Some(record.name.clone());
            scene.toggles.apply(record);
            scene.color = record.rgba();
        }
        log::debug!("headless engine loaded {:?}", record.name);
        self.scene_changed();
        Ok(())
    }

    async fn set_material_color(&self, color: Rgba) -> EngineResult<()> {
        self.require_scene()?;
        self.scene.borrow_mut().color = color;
        Ok(())
    }

    async fn toggle_material_axis(&self, axis: MaterialAxis) -> EngineResult<()> {
        self.require_scene()?;
        self.scene.borrow_mut().toggles.flip(axis);
        Ok(())
    }

    async fn toggle_selection_shape(&self) -> EngineResult<()> {
        self.require_scene()?;
        self.scene.borrow_mut().toggles.advance_shape();
        Ok(())
    }

    async fn toggle_grid(&self) -> EngineResult<()> {
        self.require_scene()?;
        self.scene.borrow_mut().toggles.flip_grid();
        Ok(())
    }

    fn draw(&self, surface_id: &str) -> EngineResult<()> {
        let scene = self.scene.borrow();
        match &scene.surface {
            Some(bound) if bound == surface_id => {}
            Some(_) => return Err(EngineError::SurfaceNotFound(surface_id.to_string())),
            None => return Err(EngineError::NotInitialized),
        }

        // Nothing to draw until a scene is current
        if scene.scene_name.is_some() {
            self.frames.set(self.frames.get() + 1);
        }
        Ok(())
    }
}
