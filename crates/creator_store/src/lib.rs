//! # Creator Store
//!
//! Asynchronous keyed persistence of scene records.
//!
//! The [`SceneStore`] trait is the contract the session layer consumes.
//! Two backends ship with the crate:
//!
//! - [`MemoryStore`] - in-process map, used for tests and ephemeral sessions
//! - [`FileStore`] - one JSON document per scene in a directory (`fs` feature)
//!
//! Both persist records through the versioned codec in `creator_scene`,
//! so a record written by an older schema still loads.

pub mod memory;
pub mod store;

#[cfg(feature = "fs")]
pub mod file;

pub use memory::MemoryStore;
pub use store::{SceneStore, StoreError, StoreResult};

#[cfg(feature = "fs")]
pub use file::FileStore;
