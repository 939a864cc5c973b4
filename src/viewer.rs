//! View session
//!
//! Owns the coastline shared by every field and at most one active field.
//! Switching scenarios tears the old field down completely before the new
//! one is created, so old and new trails never tick together.

use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigError;
use crate::renderer::RenderSurface;
use crate::scenario::Scenario;
use crate::settings::Settings;
use crate::sim::{Coastline, IntersectionOracle, TrajectoryConfig, TrajectoryField};

pub struct Viewer {
    coastline: Arc<Coastline>,
    settings: Settings,
    field: Option<TrajectoryField>,
}

impl Viewer {
    pub fn new(coastline: Coastline, settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            coastline: Arc::new(coastline),
            settings,
            field: None,
        })
    }

    /// Replace the active field with one built from `configs`; returns the
    /// number of trails that were created
    pub fn show(
        &mut self,
        configs: &[TrajectoryConfig],
        surface: &mut dyn RenderSurface,
    ) -> Result<usize, ConfigError> {
        self.clear(surface);

        let oracle: Arc<dyn IntersectionOracle> = self.coastline.clone();
        let mut field = TrajectoryField::create(configs, oracle, &self.settings, surface)?;
        field.start();
        let created = field.len();
        self.field = Some(field);
        Ok(created)
    }

    pub fn show_scenario(
        &mut self,
        scenario: Scenario,
        surface: &mut dyn RenderSurface,
    ) -> Result<usize, ConfigError> {
        log::info!("Showing {}", scenario.title());
        self.show(&scenario.configs(), surface)
    }

    /// Feed elapsed time to the active field; returns ticks run
    pub fn pump(&mut self, elapsed: Duration, surface: &mut dyn RenderSurface) -> u32 {
        match self.field.as_mut() {
            Some(field) => field.update(elapsed, surface),
            None => 0,
        }
    }

    /// Tear down the active field, if any
    pub fn clear(&mut self, surface: &mut dyn RenderSurface) {
        if let Some(field) = self.field.take() {
            field.destroy(surface);
        }
    }

    /// Swap the coastline; takes effect on the next `show`
    pub fn set_coastline(&mut self, coastline: Coastline) {
        self.coastline = Arc::new(coastline);
    }

    pub fn coastline(&self) -> &Coastline {
        &self.coastline
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn field(&self) -> Option<&TrajectoryField> {
        self.field.as_ref()
    }
}
