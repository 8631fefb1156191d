//! Clinic site desktop driver.
//!
//! Opens the site in a headless tab, attaches the navigation controller,
//! and replays a visitor scenario against it: clicks, back/forward,
//! fragment changes, scrolling and window resizes. Each step is logged and
//! printed to stdout as one JSON line.
//!
//! Usage: `ayur-app [scenario.toml]` (or `AYUR_SCENARIO`). Without a
//! scenario the built-in tour runs. `AYUR_CONFIG` points at an optional
//! `ayur.toml`.

mod app_state;
mod scenario;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use app_state::AppState;
use ayur_types::config::AyurConfig;
use scenario::Scenario;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::var_os("AYUR_CONFIG") {
        Some(path) => {
            let path = Path::new(&path);
            AyurConfig::load(path).with_context(|| format!("loading {}", path.display()))?
        },
        None => AyurConfig::default(),
    };

    // Scenario from CLI arg, AYUR_SCENARIO env var, or the built-in tour.
    let scenario = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("AYUR_SCENARIO").ok())
    {
        Some(path) => Scenario::load(Path::new(&path))
            .with_context(|| format!("loading scenario {path}"))?,
        None => {
            log::info!("No scenario given; running the built-in tour");
            Scenario::tour()
        },
    };

    log::info!(
        "Starting {} at {} ({} steps)",
        config.site.clinic_name,
        scenario.start,
        scenario.steps.len(),
    );
    let mut app = AppState::new(config, &scenario.start)?;

    let mut stdout = std::io::stdout().lock();
    for (index, step) in scenario.steps.iter().enumerate() {
        let summary = app.run_step(index, step)?;
        log::info!(
            "[{index}] {} -> {} ({:?}) scroll={} overlay={} {}ms",
            summary.action,
            summary.location,
            summary.view,
            summary.scroll_y,
            summary.overlay_seen,
            summary.elapsed_ms,
        );
        writeln!(stdout, "{}", serde_json::to_string(&summary)?)?;
    }

    log::info!("Scenario finished on {:?}", app.view());
    app.shutdown();
    Ok(())
}
