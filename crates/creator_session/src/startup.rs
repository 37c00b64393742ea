//! Startup sequencing
//!
//! `start` brings the engine up, makes sure a scene is showing, loads the
//! preferred stored scene and fills the selector. Each step runs under the
//! in-flight guard with startup origin, so it waits for any user operation
//! already in flight instead of being dropped.

use creator_engine::Engine;
use creator_store::SceneStore;

use crate::controller::SessionController;
use crate::guard::Origin;
use crate::SessionResult;

/// How far startup got
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum StartupPhase {
    #[default]
    NotStarted,
    /// Engine bound to its surface
    EngineReady,
    /// A scene is current in the engine (its own default, or one it already had)
    DefaultScene,
    /// A stored scene was loaded
    SceneLoaded,
    /// Scene names listed; the session is interactive
    Ready,
}

impl StartupPhase {
    pub fn is_ready(&self) -> bool {
        *self == StartupPhase::Ready
    }
}

impl<E: Engine, S: SceneStore> SessionController<E, S> {
    /// Run the startup sequence.
    ///
    /// Runs once per session: any later call, including one issued while
    /// the first is still suspended, is a no-op. On failure the phase
    /// records the last completed step.
    pub async fn start(&self) -> SessionResult<()> {
        if self.started.replace(true) {
            log::debug!("startup already claimed (phase {:?})", self.phase.get());
            return Ok(());
        }

        {
            let _permit = self.acquire("startup", Origin::Startup).await?;

            self.engine
                .init(&self.config.surface_id)
                .await
                .map_err(|e| self.diagnose("startup", e))?;
            self.phase.set(StartupPhase::EngineReady);
            log::info!("engine bound to surface {:?}", self.config.surface_id);

            if !self.engine.has_current_scene() {
                self.engine
                    .init_default_scene(&self.config.default_scene_name)
                    .await
                    .map_err(|e| self.diagnose("startup", e))?;
                log::debug!("engine default scene created");
            }
            self.phase.set(StartupPhase::DefaultScene);
        }

        // Each step takes the guard on its own
        let initial = {
            let _permit = self.acquire("startup", Origin::Startup).await?;

            let names = self
                .store
                .list_names()
                .await
                .map_err(|e| self.diagnose("startup", e))?;
            self.pick_initial(&names)
        };

        if let Some(name) = initial {
            let _permit = self.acquire("startup", Origin::Startup).await?;

            self.load_into_engine("startup", &name).await?;
            self.phase.set(StartupPhase::SceneLoaded);
            log::info!("loaded initial scene {:?}", name);
        } else {
            log::info!("no stored scenes; keeping the engine's default scene");
        }

        {
            let _permit = self.acquire("startup", Origin::Startup).await?;
            self.reload_names("startup").await?;
        }

        self.phase.set(StartupPhase::Ready);
        log::info!("session ready ({} stored scenes)", self.scene_names().len());
        Ok(())
    }

    /// Preferred scene: the configured default if stored, else the first name
    fn pick_initial(&self, names: &[String]) -> Option<String> {
        names
            .iter()
            .find(|name| **name == self.config.default_scene_name)
            .or_else(|| names.first())
            .cloned()
    }
}
