//! Session controller
//!
//! Owns the current scene and serializes every mutating operation
//! against the engine and the store.

use std::cell::{Cell, RefCell};

use creator_engine::Engine;
use creator_scene::{
    parse_channel, parse_hex, validate_name, GridAffordance, MaterialAxis, MaterialMode, Rgba,
    SceneRecord, SelectionShape, ToggleState,
};
use creator_store::SceneStore;
use tokio::sync::SemaphorePermit;

use crate::config::SessionConfig;
use crate::diagnostics::{DiagnosticEntry, DiagnosticLevel, Diagnostics};
use crate::guard::{InFlightGuard, Origin};
use crate::startup::StartupPhase;
use crate::{SessionError, SessionResult};

/// Entry in the scene selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorOption {
    /// Sentinel shown ahead of the real names
    None(String),
    Scene(String),
}

impl SelectorOption {
    pub fn label(&self) -> &str {
        match self {
            SelectorOption::None(label) => label,
            SelectorOption::Scene(name) => name,
        }
    }

    pub fn scene_name(&self) -> Option<&str> {
        match self {
            SelectorOption::None(_) => None,
            SelectorOption::Scene(name) => Some(name),
        }
    }
}

/// The scene currently loaded into the engine
#[derive(Debug, Clone)]
pub(crate) struct CurrentScene {
    pub(crate) name: String,
    pub(crate) toggles: ToggleState,
    pub(crate) color: Rgba,
}

impl CurrentScene {
    fn record(&self) -> SceneRecord {
        self.toggles.snapshot(self.name.clone(), self.color)
    }
}

/// Session controller.
///
/// All methods take `&self`: operations are futures that interleave on
/// one thread, and the in-flight guard decides which of them may touch
/// the engine and store.
pub struct SessionController<E, S> {
    pub(crate) engine: E,
    pub(crate) store: S,
    pub(crate) config: SessionConfig,
    guard: InFlightGuard,
    pub(crate) current: RefCell<CurrentScene>,
    names: RefCell<Vec<String>>,
    pub(crate) phase: Cell<StartupPhase>,
    /// Set by the first `start` call, before it suspends
    pub(crate) started: Cell<bool>,
    diagnostics: RefCell<Diagnostics>,
}

impl<E: Engine, S: SceneStore> SessionController<E, S> {
    pub fn new(engine: E, store: S, config: SessionConfig) -> Self {
        let current = CurrentScene {
            name: config.default_scene_name.clone(),
            toggles: ToggleState::default(),
            color: Rgba::default(),
        };
        let diagnostics = Diagnostics::with_capacity(config.diagnostics_capacity);

        Self {
            engine,
            store,
            config,
            guard: InFlightGuard::new(),
            current: RefCell::new(current),
            names: RefCell::new(Vec::new()),
            phase: Cell::new(StartupPhase::NotStarted),
            started: Cell::new(false),
            diagnostics: RefCell::new(diagnostics),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether an operation is in flight
    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn startup_phase(&self) -> StartupPhase {
        self.phase.get()
    }

    /// Name of the current scene, as shown in the editable name field
    pub fn current_name(&self) -> String {
        self.current.borrow().name.clone()
    }

    /// Record describing the current scene
    pub fn current_record(&self) -> SceneRecord {
        self.current.borrow().record()
    }

    pub fn toggles(&self) -> ToggleState {
        self.current.borrow().toggles
    }

    pub fn color(&self) -> Rgba {
        self.current.borrow().color
    }

    pub fn grid_affordance(&self) -> GridAffordance {
        self.current.borrow().toggles.grid_affordance()
    }

    /// Cached scene names, as of the last refresh
    pub fn scene_names(&self) -> Vec<String> {
        self.names.borrow().clone()
    }

    /// Selector entries: the "none" sentinel followed by every cached name
    pub fn selector_options(&self) -> Vec<SelectorOption> {
        std::iter::once(SelectorOption::None(self.config.none_label.clone()))
            .chain(self.names.borrow().iter().cloned().map(SelectorOption::Scene))
            .collect()
    }

    pub fn diagnostics(&self) -> Vec<DiagnosticEntry> {
        self.diagnostics.borrow().entries().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Write the current scene to the store and refresh the name list.
    pub async fn save_current(&self) -> SessionResult<()> {
        let _permit = self.acquire("save", Origin::User).await?;

        let record = self.current_record();
        self.store
            .put(&record)
            .await
            .map_err(|e| self.diagnose("save", e))?;
        self.reload_names("save").await?;

        log::info!("saved scene {:?}", record.name);
        Ok(())
    }

    /// Erase the current scene's record from the store.
    ///
    /// The in-memory scene stays current, so it can be saved again
    /// under the same or another name.
    pub async fn delete_current(&self) -> SessionResult<()> {
        let _permit = self.acquire("delete", Origin::User).await?;

        let name = self.current_name();
        self.store
            .delete(&name)
            .await
            .map_err(|e| self.diagnose("delete", e))?;
        self.reload_names("delete").await?;

        log::info!("deleted scene {:?}", name);
        Ok(())
    }

    /// Make a stored scene current.
    ///
    /// Waits for the engine to signal readiness before loading; a second
    /// load issued during the wait is dropped.
    pub async fn load(&self, name: &str) -> SessionResult<()> {
        validate_name(name).map_err(|e| self.reject("load", e))?;
        let _permit = self.acquire("load", Origin::User).await?;

        self.load_into_engine("load", name).await?;

        log::info!("loaded scene {:?}", name);
        Ok(())
    }

    /// Change the current scene's name. Nothing is written until the next save.
    pub async fn rename(&self, new_name: &str) -> SessionResult<()> {
        validate_name(new_name).map_err(|e| self.reject("rename", e))?;
        let _permit = self.acquire("rename", Origin::User).await?;

        let old = std::mem::replace(&mut self.current.borrow_mut().name, new_name.to_string());
        log::info!("renamed scene {:?} -> {:?}", old, new_name);
        Ok(())
    }

    /// Flip one material axis
    pub async fn toggle_material_mode(&self, axis: MaterialAxis) -> SessionResult<MaterialMode> {
        let _permit = self.acquire("toggle material", Origin::User).await?;

        self.engine
            .toggle_material_axis(axis)
            .await
            .map_err(|e| self.diagnose("toggle material", e))?;

        let mode = self.current.borrow_mut().toggles.flip(axis);
        log::debug!("material {} -> {:?}", axis.name(), mode);
        Ok(mode)
    }

    /// Advance the selection shape one step
    pub async fn toggle_shape(&self) -> SessionResult<SelectionShape> {
        let _permit = self.acquire("toggle shape", Origin::User).await?;

        self.engine
            .toggle_selection_shape()
            .await
            .map_err(|e| self.diagnose("toggle shape", e))?;

        let shape = self.current.borrow_mut().toggles.advance_shape();
        log::debug!("selection shape -> {}", shape);
        Ok(shape)
    }

    /// Flip grid visibility; returns the new visibility
    pub async fn toggle_grid(&self) -> SessionResult<bool> {
        let _permit = self.acquire("toggle grid", Origin::User).await?;

        self.engine
            .toggle_grid()
            .await
            .map_err(|e| self.diagnose("toggle grid", e))?;

        let visible = self.current.borrow_mut().toggles.flip_grid();
        log::debug!("grid visible -> {}", visible);
        Ok(visible)
    }

    /// Set the material colour from a hex string and optional decimal alpha.
    ///
    /// Malformed input changes nothing. Without an alpha the current
    /// alpha is kept.
    pub async fn set_color(&self, hex: &str, alpha: Option<&str>) -> SessionResult<Rgba> {
        let rgb = parse_hex(hex).map_err(|e| self.reject("set color", e))?;
        let alpha = match alpha {
            Some(alpha) => parse_channel(alpha).map_err(|e| self.reject("set color", e))?,
            None => self.current.borrow().color.a,
        };
        let color = rgb.with_alpha(alpha);

        let _permit = self.acquire("set color", Origin::User).await?;

        self.engine
            .set_material_color(color)
            .await
            .map_err(|e| self.diagnose("set color", e))?;

        self.current.borrow_mut().color = color;
        log::debug!("material colour -> {} alpha {}", rgb.to_hex(), alpha);
        Ok(color)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    pub(crate) async fn acquire(
        &self,
        operation: &'static str,
        origin: Origin,
    ) -> SessionResult<SemaphorePermit<'_>> {
        if origin == Origin::Startup && self.guard.is_busy() {
            log::debug!("{} queued behind in-flight operation", operation);
        }

        match self.guard.acquire(origin).await {
            Some(permit) => Ok(permit),
            None => {
                log::debug!("{} dropped: another operation is in flight", operation);
                Err(SessionError::Busy)
            }
        }
    }

    /// Fetch `name`, wait for the engine and load it. Caller holds the guard.
    pub(crate) async fn load_into_engine(
        &self,
        operation: &'static str,
        name: &str,
    ) -> SessionResult<()> {
        self.engine
            .ready()
            .await
            .map_err(|e| self.diagnose(operation, e))?;

        let record = self
            .store
            .get(name)
            .await
            .map_err(|e| self.diagnose(operation, e))?;

        self.engine
            .load_scene(&record)
            .await
            .map_err(|e| self.diagnose(operation, e))?;

        self.adopt(&record);
        Ok(())
    }

    /// Refresh the cached names. Caller holds the guard.
    pub(crate) async fn reload_names(&self, operation: &'static str) -> SessionResult<()> {
        let names = self
            .store
            .list_names()
            .await
            .map_err(|e| self.diagnose(operation, e))?;
        *self.names.borrow_mut() = names;
        Ok(())
    }

    pub(crate) fn adopt(&self, record: &SceneRecord) {
        let mut current = self.current.borrow_mut();
        current.name = record.name.clone();
        current.toggles.apply(record);
        current.color = record.rgba();
    }

    /// Route a store or engine failure to the diagnostic sink
    pub(crate) fn diagnose(
        &self,
        operation: &'static str,
        err: impl Into<SessionError>,
    ) -> SessionError {
        let err = err.into();
        let level = match &err {
            SessionError::Store(e) if e.is_not_found() => DiagnosticLevel::Warning,
            _ => DiagnosticLevel::Error,
        };
        self.diagnostics
            .borrow_mut()
            .record(level, operation, err.to_string());
        err
    }

    /// Malformed input: logged quietly, never surfaced
    fn reject(&self, operation: &'static str, err: impl Into<SessionError>) -> SessionError {
        let err = err.into();
        log::debug!("{} ignored: {}", operation, err);
        err
    }
}
