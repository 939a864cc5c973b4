//! Wind Trails headless runner
//!
//! Loads a coastline and settings, shows one region/season preset and
//! drives it for a fixed number of ticks, logging trail statistics.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Duration;

    use anyhow::{Context, Result, anyhow, bail};
    use structopt::StructOpt;

    use wind_trails::renderer::TrailMesh;
    use wind_trails::sim::Coastline;
    use wind_trails::{CollisionPolicy, Region, Scenario, Season, Settings, Viewer};

    #[derive(StructOpt)]
    #[structopt(name = "wind-trails")]
    struct Args {
        /// Northern, Central or Southern
        #[structopt(long, default_value = "northern")]
        region: String,
        /// Summer or Winter
        #[structopt(long, default_value = "summer")]
        season: String,
        /// Collision policy: restart (a) or freeze-fade (b). Overrides the settings file
        #[structopt(long)]
        policy: Option<String>,
        /// GeoJSON coastline, already normalized into path space
        #[structopt(long, parse(from_os_str))]
        coastline: Option<PathBuf>,
        /// JSON settings file
        #[structopt(long, parse(from_os_str))]
        settings: Option<PathBuf>,
        /// Number of ticks to run
        #[structopt(long, default_value = "1000")]
        ticks: u64,
        /// Log statistics every N ticks (0 disables)
        #[structopt(long, default_value = "250")]
        report_every: u64,
    }

    impl Args {
        fn scenario(&self) -> Result<Scenario> {
            let region = Region::from_str(&self.region)
                .ok_or_else(|| anyhow!("Unknown region {:?}", self.region))?;
            let season = Season::from_str(&self.season)
                .ok_or_else(|| anyhow!("Unknown season {:?}", self.season))?;
            Ok(Scenario::new(region, season))
        }

        fn settings(&self) -> Result<Settings> {
            let mut settings = match &self.settings {
                Some(path) => Settings::load(path)
                    .with_context(|| format!("reading settings {}", path.display()))?,
                None => Settings::default(),
            };
            if let Some(name) = &self.policy {
                settings.policy = CollisionPolicy::from_str(name)
                    .ok_or_else(|| anyhow!("Unknown collision policy {:?}", name))?;
            }
            Ok(settings)
        }

        fn coastline(&self, scenario: &Scenario) -> Result<Coastline> {
            match &self.coastline {
                Some(path) => Coastline::load(path)
                    .with_context(|| format!("reading coastline {}", path.display())),
                None => {
                    log::warn!(
                        "No --coastline given (expected a {} layer); trails will never collide",
                        scenario.basemap()
                    );
                    Ok(Coastline::empty())
                }
            }
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();

        let args = Args::from_args();
        let scenario = args.scenario()?;
        let settings = args.settings()?;
        let coastline = args.coastline(&scenario)?;

        let mut mesh = TrailMesh::new();
        mesh.set_basemap(&coastline);

        let interval = Duration::from_millis(settings.tick_interval_ms);
        let mut viewer = Viewer::new(coastline, settings)?;
        if viewer.show_scenario(scenario, &mut mesh)? == 0 {
            bail!("{} produced no trails", scenario.title());
        }

        let mut ticks = 0;
        while ticks < args.ticks {
            ticks += u64::from(viewer.pump(interval, &mut mesh));
            if args.report_every > 0 && ticks % args.report_every == 0 {
                report(&viewer, &mesh, ticks);
            }
        }

        if args.report_every == 0 || ticks % args.report_every != 0 {
            report(&viewer, &mesh, ticks);
        }
        viewer.clear(&mut mesh);
        Ok(())
    }

    fn report(viewer: &Viewer, mesh: &TrailMesh, ticks: u64) {
        if let Some(field) = viewer.field() {
            let stats = field.stats();
            log::info!(
                "tick {}: {} trails, {} collisions, {} restarts, {} wraps, {} vertices",
                ticks,
                field.len(),
                stats.collisions,
                stats.restarts,
                stats.wraps,
                mesh.vertex_count()
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
