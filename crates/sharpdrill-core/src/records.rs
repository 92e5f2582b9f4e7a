//! Record store with atomic JSON persistence.
//!
//! The records file maps every item id to `[correct, total, weight]`. It is
//! the only durable state of the program, so writes go to a temporary file in
//! the same directory which is then renamed over the original.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::catalog::Catalog;
use crate::error::DrillError;
use crate::model::Record;

/// Item id to record.
pub type Records = BTreeMap<String, Record>;

/// File-backed record store.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record from disk.
    pub fn load(&self) -> Result<Records> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read records from {}", self.path.display()))?;
        let records: Records = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse records JSON: {}", self.path.display()))?;
        tracing::debug!(count = records.len(), "loaded records");
        Ok(records)
    }

    /// Replace the stored records.
    ///
    /// Either the whole new mapping becomes visible or the old file is left
    /// untouched.
    pub fn save(&self, records: &Records) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records
            .serialize(&mut ser)
            .context("failed to serialize records")?;

        let mut tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
        tmp.write_all(&buf)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("failed to write records to {}", self.path.display()))?;

        tracing::info!(count = records.len(), "saved records to {}", self.path.display());
        Ok(())
    }

    /// Load the records, add defaults for new material and save right away
    /// if anything was added. Returns the ids that were added.
    pub fn load_reconciled(&self, catalog: &Catalog) -> Result<(Records, Vec<String>)> {
        let (records, added) = reconcile(self.load()?, catalog);
        if !added.is_empty() {
            self.save(&records)?;
        }
        Ok((records, added))
    }

    /// Copy the records file byte for byte.
    pub fn backup(&self, target: &Path) -> Result<()> {
        std::fs::copy(&self.path, target).with_context(|| {
            format!(
                "failed to back up {} to {}",
                self.path.display(),
                target.display()
            )
        })?;
        tracing::info!("backed up records to {}", target.display());
        Ok(())
    }
}

/// Give every catalog item without a record a fresh one.
///
/// Existing entries are left untouched, including records of items that no
/// longer have material.
pub fn reconcile(mut records: Records, catalog: &Catalog) -> (Records, Vec<String>) {
    let mut added = Vec::new();
    for id in catalog.ids() {
        if !records.contains_key(id) {
            records.insert(id.clone(), Record::fresh());
            tracing::debug!("added item {id} to records");
            added.push(id.clone());
        }
    }
    (records, added)
}

/// Map every record to the never-asked default.
pub fn reset(records: Records) -> Records {
    records
        .into_keys()
        .map(|id| (id, Record::fresh()))
        .collect()
}

/// Fold the score of one asked item into its record.
pub fn update(mut records: Records, id: &str, score: f64) -> Result<Records, DrillError> {
    let record = records
        .get_mut(id)
        .ok_or_else(|| DrillError::UnknownItem(id.to_string()))?;
    record.apply_score(score);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::INITIAL_WEIGHT;

    fn catalog_with(ids: &[&str]) -> Catalog {
        let items: Vec<String> = ids
            .iter()
            .map(|id| format!(r#""{id}": ["stolz", "auf", "Akkusativ"]"#))
            .collect();
        let content = format!(r#"{{ "Adjective+preposition": {{ {} }} }}"#, items.join(","));
        Catalog::from_json_str(&content, Path::new("material.json")).unwrap()
    }

    #[test]
    fn reconcile_adds_missing_items_only() {
        let mut records = Records::new();
        records.insert(
            "A".into(),
            Record {
                correct: 3.0,
                total: 4,
                weight: 0.4,
            },
        );

        let (records, added) = reconcile(records, &catalog_with(&["A", "X"]));

        assert_eq!(added, vec!["X".to_string()]);
        assert_eq!(records["X"], Record::fresh());
        assert_eq!(records["A"].total, 4);
        assert_eq!(records["A"].weight, 0.4);
    }

    #[test]
    fn reconcile_keeps_orphans() {
        let mut records = Records::new();
        records.insert("gone".into(), Record::fresh());
        let (records, added) = reconcile(records, &catalog_with(&["A"]));
        assert!(records.contains_key("gone"));
        assert_eq!(added.len(), 1);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut records = Records::new();
        records.insert(
            "A".into(),
            Record {
                correct: 7.5,
                total: 12,
                weight: 0.2,
            },
        );
        records.insert("B".into(), Record::fresh());

        let records = reset(records);
        assert_eq!(records.len(), 2);
        for record in records.values() {
            assert_eq!(record.correct, 0.0);
            assert_eq!(record.total, 0);
            assert_eq!(record.weight, INITIAL_WEIGHT);
        }
    }

    #[test]
    fn update_right_then_wrong() {
        let mut records = Records::new();
        records.insert("A".into(), Record::fresh());

        let records = update(records, "A", 1.0).unwrap();
        let records = update(records, "A", 0.0).unwrap();

        assert_eq!(records["A"].total, 2);
        assert_eq!(records["A"].correct, 1.0);
        assert!((records["A"].weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn update_unknown_item_fails() {
        let result = update(Records::new(), "missing", 1.0);
        assert!(matches!(result, Err(DrillError::UnknownItem(id)) if id == "missing"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("records.json"));

        let mut records = Records::new();
        records.insert("A".into(), Record::fresh());
        records = update(records, "A", 0.5).unwrap();
        store.save(&records).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\n    \"A\": ["));
    }

    #[test]
    fn save_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("records.json"));
        store.save(&Records::new()).unwrap();
        store.save(&Records::new()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("nope.json"));
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("failed to read records"));
    }

    #[test]
    fn load_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"{ "A": [0, 0] }"#).unwrap();
        assert!(RecordStore::new(path).load().is_err());
    }

    #[test]
    fn load_reconciled_persists_new_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, "{}").unwrap();
        let store = RecordStore::new(&path);

        let (records, added) = store.load_reconciled(&catalog_with(&["A", "B"])).unwrap();
        assert_eq!(added.len(), 2);
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn backup_copies_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("records.json"));
        let mut records = Records::new();
        records.insert("A".into(), Record::fresh());
        store.save(&records).unwrap();

        let target = dir.path().join("backup.json");
        store.backup(&target).unwrap();
        assert_eq!(
            std::fs::read(store.path()).unwrap(),
            std::fs::read(&target).unwrap()
        );
    }
}
