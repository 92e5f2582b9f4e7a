//! The `sharpdrill stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use sharpdrill_core::model::QuestionKind;

use super::open_workspace;

pub fn execute(limit: Option<usize>, config_path: Option<PathBuf>) -> Result<()> {
    let workspace = open_workspace(config_path)?;

    let mut rows: Vec<_> = workspace
        .catalog
        .ids()
        .filter_map(|id| {
            let kind = workspace.catalog.get(id)?.kind();
            let record = workspace.records.get(id)?;
            Some((id, kind, record))
        })
        .collect();
    rows.sort_by(|a, b| b.2.weight.total_cmp(&a.2.weight).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new();
    table.set_header(vec!["Item", "Type", "Correct", "Asked", "Accuracy", "Weight"]);
    for (id, kind, record) in rows.iter().take(limit.unwrap_or(usize::MAX)) {
        table.add_row(vec![
            Cell::new(id),
            Cell::new(kind),
            Cell::new(record.correct),
            Cell::new(record.total),
            Cell::new(
                record
                    .accuracy()
                    .map_or_else(|| "-".to_string(), |a| format!("{:.0}%", a * 100.0)),
            ),
            Cell::new(format!("{:.3}", record.weight)),
        ]);
    }
    println!("{table}");

    for kind in QuestionKind::ALL {
        println!("{kind}: {} item(s)", workspace.catalog.count(kind));
    }
    println!("Total: {} item(s)", workspace.catalog.len());

    Ok(())
}
