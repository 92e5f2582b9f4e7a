//! The `sharpdrill drill` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sharpdrill_core::casual::{banner, CasualMode};
use sharpdrill_core::console::{Console, Tone};
use sharpdrill_core::model::QuestionKind;
use sharpdrill_core::registry::Registry;
use sharpdrill_core::session::{configure, DrillEngine, DrillReport, DrillSettings};

use super::open_workspace;
use crate::signals::spawn_casual_listener;
use crate::terminal::{TerminalConsole, Theme};

/// Command-line overrides for one drill.
pub struct DrillOptions {
    pub questions: Option<usize>,
    pub review: Option<bool>,
    pub types: Option<Vec<QuestionKind>>,
    pub casual: bool,
    pub seed: Option<u64>,
    pub skip_settings: bool,
}

pub async fn execute(opts: DrillOptions, config_path: Option<PathBuf>) -> Result<()> {
    let workspace = open_workspace(config_path)?;
    let config = workspace.config;

    let mut registry = Registry::build(&workspace.catalog, &workspace.records);
    registry.enable_only(opts.types.as_deref().unwrap_or(&config.enabled_types));

    let settings = DrillSettings::new(
        opts.questions.unwrap_or(config.questions),
        opts.review.unwrap_or(config.review),
    )?;

    let theme = Theme::preset(config.theme);
    let mut console = TerminalConsole::new(theme);
    print_banner(&mut console, &registry);

    let casual = CasualMode::new(opts.casual);
    if casual.is_active() {
        console.show(Tone::Accent, banner(true));
    }
    let listener = spawn_casual_listener(casual.clone(), theme)?;

    let engine = DrillEngine::new(workspace.store, casual);
    let seed = opts.seed;
    let skip_settings = opts.skip_settings;

    // Prompts block on stdin; keep them off the runtime so the signal
    // listener stays responsive.
    let outcome = tokio::task::spawn_blocking(move || -> Result<DrillReport> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let settings = if skip_settings {
            settings
        } else {
            configure(&mut console, settings, &mut registry)?
        };
        engine.run(&registry, &settings, &mut console, &mut rng)
    })
    .await
    .context("drill task failed")?;

    listener.abort();
    let report = outcome?;

    tracing::info!(
        asked = report.items.len(),
        graded = report.graded,
        persisted = report.persisted,
        "drill finished"
    );

    Ok(())
}

fn print_banner(console: &mut dyn Console, registry: &Registry) {
    console.say("Questions in store:");
    for entry in registry.entries() {
        let state = if registry.is_enabled(entry.kind) {
            ""
        } else {
            " (disabled)"
        };
        console.say(&format!(
            "    * {}: {}{state}",
            entry.kind,
            registry.count(entry.kind)
        ));
    }
    console.say(&format!("    Total: {}", registry.total()));
    if cfg!(unix) {
        console.say("Press ctrl+z to toggle casual mode (records not saved), ctrl+c to quit");
    } else {
        console.say("Press ctrl+c to quit");
    }
    console.say("");
}
