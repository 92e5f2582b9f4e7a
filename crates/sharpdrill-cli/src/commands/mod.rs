//! One module per subcommand, plus the loading steps they share.

pub mod backup;
pub mod drill;
pub mod init;
pub mod reset;
pub mod stats;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

use sharpdrill_core::catalog::Catalog;
use sharpdrill_core::config::{load_config_from, DrillConfig};
use sharpdrill_core::error::DrillError;
use sharpdrill_core::records::{RecordStore, Records};

/// Material and records, reconciled and ready for a command.
pub struct Workspace {
    pub config: DrillConfig,
    pub catalog: Catalog,
    pub store: RecordStore,
    pub records: Records,
}

/// Load the config, the material and the records.
///
/// Items new to the records get a fresh entry, announced on stdout, and the
/// records file is rewritten right away.
pub fn open_workspace(config_path: Option<PathBuf>) -> Result<Workspace> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = load_catalog(&config.material_path)?;
    let store = RecordStore::new(config.records_path.clone());

    let (records, added) = store.load_reconciled(&catalog)?;
    for id in &added {
        println!("Added item {id} to records");
    }

    Ok(Workspace {
        config,
        catalog,
        store,
        records,
    })
}

/// Load the material, naming the file when its content is at fault.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).map_err(|e| {
        let material_fault = e
            .downcast_ref::<DrillError>()
            .is_some_and(DrillError::is_material_error);
        if material_fault {
            e.context(format!("invalid material in {}", path.display()))
        } else {
            e
        }
    })
}

/// Ask for a yes/y/no/n confirmation on stdin.
pub fn confirm(prompt: &str, theme: crate::terminal::Theme) -> Result<bool> {
    use sharpdrill_core::console::Console;

    crate::terminal::TerminalConsole::new(theme).confirm(prompt)
}
