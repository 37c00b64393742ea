//! Fixed-cadence frame driver

use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use crate::engine::Engine;

const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Calls [`Engine::draw`] on a fixed interval.
///
/// Runs as its own cooperative task next to the session; draw failures
/// are logged and the loop carries on.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    surface_id: String,
    frame_interval: Duration,
}

impl RenderLoop {
    /// Intervals below one millisecond are raised to one millisecond
    pub fn new(surface_id: impl Into<String>, frame_interval: Duration) -> Self {
        Self {
            surface_id: surface_id.into(),
            frame_interval: frame_interval.max(MIN_FRAME_INTERVAL),
        }
    }

    /// Draw until `max_ticks` ticks have elapsed (forever if `None`).
    ///
    /// Returns the number of successful draw calls.
    pub async fn run<E: Engine + ?Sized>(&self, engine: &E, max_ticks: Option<u64>) -> u64 {
        let mut ticker = interval(self.frame_interval);
        // Late frames are skipped rather than bunched up
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = 0u64;
        let mut drawn = 0u64;
        let mut failing = false;

        while max_ticks.map(|max| ticks < max).unwrap_or(true) {
            ticker.tick().await;
            ticks += 1;

            match engine.draw(&self.surface_id) {
                Ok(()) => {
                    drawn += 1;
                    if failing {
                        log::info!("render loop recovered on {:?}", self.surface_id);
                        failing = false;
                    }
                }
                Err(e) => {
                    // Log the first failure of a run of failures only
                    if !failing {
                        log::warn!("draw on {:?} failed: {}", self.surface_id, e);
                        failing = true;
                    }
                }
            }
        }

        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessEngine;

    #[tokio::test(start_paused = true)]
    async fn test_runs_requested_ticks() {
        let engine = HeadlessEngine::new(["scene"]);
        engine.init("scene").await.unwrap();
        engine.init_default_scene("Default").await.unwrap();

        let render_loop = RenderLoop::new("scene", Duration::from_millis(100));
        let drawn = render_loop.run(&engine, Some(5)).await;

        assert_eq!(drawn, 5);
        assert_eq!(engine.frames(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_do_not_stop_loop() {
        let engine = HeadlessEngine::new(["scene"]);

        let render_loop = RenderLoop::new("scene", Duration::from_millis(10));
        let drawn = render_loop.run(&engine, Some(3)).await;

        assert_eq!(drawn, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_interval() {
        let engine = HeadlessEngine::new(["scene"]);
        engine.init("scene").await.unwrap();
        engine.init_default_scene("Default").await.unwrap();

        let start = tokio::time::Instant::now();
        RenderLoop::new("scene", Duration::from_millis(100))
            .run(&engine, Some(4))
            .await;

        // First tick fires immediately
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_raised() {
        let engine = HeadlessEngine::new(["scene"]);
        engine.init("scene").await.unwrap();
        engine.init_default_scene("Default").await.unwrap();

        let start = tokio::time::Instant::now();
        let drawn = RenderLoop::new("scene", Duration::ZERO)
            .run(&engine, Some(3))
            .await;

        assert_eq!(drawn, 3);
        assert_eq!(start.elapsed(), Duration::from_millis(2));
    }
}
