//! The `sharpdrill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use sharpdrill_core::catalog::validate_catalog;
use sharpdrill_core::config::load_config_from;
use sharpdrill_core::model::QuestionKind;
use sharpdrill_core::records::RecordStore;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = super::load_catalog(&config.material_path)?;

    let counts: Vec<String> = QuestionKind::ALL
        .into_iter()
        .map(|kind| format!("{} {kind}", catalog.count(kind)))
        .collect();
    println!(
        "Material: {} ({} items: {})",
        config.material_path.display(),
        catalog.len(),
        counts.join(", ")
    );

    // Records are optional here; without them orphans cannot be checked.
    let store = RecordStore::new(config.records_path.clone());
    let records = if store.path().exists() {
        Some(store.load()?)
    } else {
        None
    };

    let warnings = validate_catalog(&catalog, records.as_ref());
    for w in &warnings {
        let prefix = w
            .item_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All material valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
