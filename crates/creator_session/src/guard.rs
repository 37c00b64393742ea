//! In-flight guard
//!
//! At most one mutating operation touches the engine or the store at a
//! time. The guard is a one-permit semaphore: user operations try for
//! the permit and are dropped when it is taken, startup operations wait
//! for it in arrival order. The permit is released when dropped, on every
//! exit path.

use tokio::sync::{Semaphore, SemaphorePermit};

/// Where an operation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Direct user interaction: dropped while busy
    User,
    /// Startup sequencing: queued while busy
    Startup,
}

/// Single in-flight guard
#[derive(Debug)]
pub struct InFlightGuard {
    permit: Semaphore,
}

impl Default for InFlightGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self {
            permit: Semaphore::new(1),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.permit.available_permits() == 0
    }

    /// Take the guard. `None` means the operation was dropped.
    pub async fn acquire(&self, origin: Origin) -> Option<SemaphorePermit<'_>> {
        match origin {
            Origin::User => self.permit.try_acquire().ok(),
            // Only fails if the semaphore is closed, which never happens
            Origin::Startup => self.permit.acquire().await.ok(),
        }
    }
}
