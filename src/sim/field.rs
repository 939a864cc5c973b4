//! A set of trails animated together
//!
//! The field owns one animator per accepted configuration, the shared
//! coastline oracle and the frame clock. Every pulse advances all animators
//! once and hands the render surface a single batch.

use std::sync::Arc;
use std::time::Duration;

use super::animator::{TrailFrame, TrailId, TrailStats, TrajectoryAnimator};
use super::clock::FrameClock;
use super::coastline::IntersectionOracle;
use super::path::TrajectoryConfig;
use crate::error::ConfigError;
use crate::renderer::RenderSurface;
use crate::settings::Settings;

/// A configuration that could not be turned into a trail
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedConfig {
    /// Position in the list passed to `create`
    pub index: usize,
    pub error: ConfigError,
}

pub struct TrajectoryField {
    animators: Vec<TrajectoryAnimator>,
    oracle: Arc<dyn IntersectionOracle>,
    clock: FrameClock,
    rejected: Vec<RejectedConfig>,
    tick_count: u64,
}

impl TrajectoryField {
    /// Build one animator per config and register each with `surface`.
    ///
    /// Invalid `settings` reject the whole field before anything is
    /// registered. A config that fails to generate is logged and skipped;
    /// the rest of the field is still built. The clock starts stopped.
    pub fn create(
        configs: &[TrajectoryConfig],
        oracle: Arc<dyn IntersectionOracle>,
        settings: &Settings,
        surface: &mut dyn RenderSurface,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut animators = Vec::with_capacity(configs.len());
        let mut rejected = Vec::new();

        for (index, config) in configs.iter().enumerate() {
            match config.build() {
                Ok(path) => {
                    let id = TrailId(animators.len() as u32 + 1);
                    let animator = TrajectoryAnimator::new(id, path, settings)?;
                    surface.register(id);
                    animators.push(animator);
                }
                Err(error) => {
                    log::warn!("Skipping trajectory {}: {}", index, error);
                    rejected.push(RejectedConfig { index, error });
                }
            }
        }

        log::info!(
            "Created field: {} trails ({} rejected), policy {}",
            animators.len(),
            rejected.len(),
            settings.policy.as_str()
        );

        Ok(Self {
            animators,
            oracle,
            clock: FrameClock::from_settings(settings),
            rejected,
            tick_count: 0,
        })
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Feed elapsed time; runs every pulse that came due and returns how many
    pub fn update(&mut self, elapsed: Duration, surface: &mut dyn RenderSurface) -> u32 {
        let pulses = self.clock.pulses(elapsed);
        for _ in 0..pulses {
            self.tick(surface);
        }
        pulses
    }

    /// Advance every trail once and submit the results as one batch
    pub fn tick(&mut self, surface: &mut dyn RenderSurface) {
        let oracle = self.oracle.as_ref();
        let batch: Vec<TrailFrame> = self
            .animators
            .iter_mut()
            .map(|animator| animator.advance(oracle))
            .collect();

        self.tick_count += 1;
        surface.submit(&batch);
        surface.request_redraw();
    }

    /// Stop the clock and release every trail from `surface`
    pub fn destroy(mut self, surface: &mut dyn RenderSurface) {
        self.clock.stop();
        for animator in &self.animators {
            surface.release(animator.id());
        }
        log::info!(
            "Destroyed field after {} ticks ({} trails)",
            self.tick_count,
            self.animators.len()
        );
    }

    pub fn len(&self) -> usize {
        self.animators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animators.is_empty()
    }

    pub fn animators(&self) -> &[TrajectoryAnimator] {
        &self.animators
    }

    pub fn rejected(&self) -> &[RejectedConfig] {
        &self.rejected
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Counters summed over every trail
    pub fn stats(&self) -> TrailStats {
        let mut total = TrailStats::default();
        for animator in &self.animators {
            total.merge(&animator.stats());
        }
        total
    }
}

impl std::fmt::Debug for TrajectoryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrajectoryField")
            .field("trails", &self.animators.len())
            .field("rejected", &self.rejected)
            .field("clock", &self.clock)
            .field("tick_count", &self.tick_count)
            .finish()
    }
}
