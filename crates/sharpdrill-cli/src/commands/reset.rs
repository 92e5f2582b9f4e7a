//! The `sharpdrill reset` command.

use std::path::PathBuf;

use anyhow::Result;

use sharpdrill_core::records::reset;

use super::{confirm, open_workspace};
use crate::terminal::Theme;

pub fn execute(yes: bool, config_path: Option<PathBuf>) -> Result<()> {
    let workspace = open_workspace(config_path)?;
    let theme = Theme::preset(workspace.config.theme);

    if !yes && !confirm("Reset every record? [yes/y, no/n]: ", theme)? {
        println!("Record reset aborted");
        return Ok(());
    }

    let records = reset(workspace.records);
    workspace.store.save(&records)?;
    println!("Record reset successful");

    Ok(())
}
