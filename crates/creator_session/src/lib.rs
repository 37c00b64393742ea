//! # Creator Session
//!
//! Session orchestration for the scene editor.
//!
//! The [`SessionController`] owns the current scene and is the only
//! component that talks to both the engine and the store. It:
//!
//! - sequences startup (engine init → default scene → first stored scene → name list)
//! - serializes mutating operations behind a single in-flight guard
//! - keeps the toggle state machine in step with the engine
//! - reports failures to a [`Diagnostics`] sink instead of the user
//!
//! ## Scheduling
//!
//! Everything runs on one thread. Operations suspend at engine and store
//! calls; while one is suspended, user operations are dropped with
//! [`SessionError::Busy`] and startup work queues behind it.
//!
//! ```text
//! user action ──► guard ──► engine / store ──► toggle state ──► guard released
//!                   │
//!                   └─ busy: dropped (user) / queued (startup)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let session = SessionController::new(engine, store, SessionConfig::default());
//! session.start().await?;
//!
//! session.toggle_shape().await?;
//! session.set_color("#ff0000", None).await?;
//! session.save_current().await?;
//! ```

pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod guard;
pub mod startup;

pub use config::SessionConfig;
pub use controller::{SelectorOption, SessionController};
pub use diagnostics::{DiagnosticEntry, DiagnosticLevel, Diagnostics};
pub use guard::{InFlightGuard, Origin};
pub use startup::StartupPhase;

use creator_engine::EngineError;
use creator_scene::ParseError;
use creator_store::StoreError;
use thiserror::Error;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Dropped because another operation was in flight
    #[error("Another operation is in flight")]
    Busy,

    #[error("Invalid input: {0}")]
    Parse(#[from] ParseError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

impl SessionError {
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionError::Busy)
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
