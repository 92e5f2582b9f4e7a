//! The `sharpdrill backup` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{confirm, open_workspace};
use crate::terminal::Theme;

pub fn execute(target: Option<PathBuf>, yes: bool, config_path: Option<PathBuf>) -> Result<()> {
    let workspace = open_workspace(config_path)?;
    let theme = Theme::preset(workspace.config.theme);
    let target = target.unwrap_or_else(|| default_target(workspace.store.path()));

    let prompt = format!("Back up records to {}? [yes/y, no/n]: ", target.display());
    if !yes && !confirm(&prompt, theme)? {
        println!("Record backup aborted");
        return Ok(());
    }

    workspace.store.backup(&target)?;
    println!("Record backup successful");

    Ok(())
}

/// `records-backup-<UTC timestamp>.json` next to the records file.
fn default_target(records_path: &Path) -> PathBuf {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    let name = format!("records-backup-{stamp}.json");
    match records_path.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
