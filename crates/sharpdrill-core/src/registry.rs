//! Question-type registry: which types a drill draws from, and the merged
//! pool of material and records for each type.

use std::collections::BTreeMap;

use crate::catalog::{Catalog, Material};
use crate::model::{QuestionKind, Record};
use crate::records::Records;
use crate::sampler::Candidate;

/// One exercise: the item's material and its record at load time.
#[derive(Debug, Clone)]
pub struct Exercise {
    pub material: Material,
    pub record: Record,
}

/// A question type, whether it is enabled, and its exercises.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    pub kind: QuestionKind,
    pub enabled: bool,
    pub exercises: BTreeMap<String, Exercise>,
}

/// Question types in display order.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<TypeEntry>,
}

impl Registry {
    /// Merge material and records. Every catalog item must have a record;
    /// run [`crate::records::reconcile`] first. Items without one get a
    /// fresh record.
    pub fn build(catalog: &Catalog, records: &Records) -> Self {
        let entries = QuestionKind::ALL
            .into_iter()
            .map(|kind| TypeEntry {
                kind,
                enabled: kind.enabled_by_default(),
                exercises: catalog
                    .bucket(kind)
                    .map(|(id, material)| {
                        let record = records.get(id).copied().unwrap_or_else(|| {
                            tracing::warn!("item {id} has no record, using a fresh one");
                            Record::fresh()
                        });
                        (
                            id.clone(),
                            Exercise {
                                material: material.clone(),
                                record,
                            },
                        )
                    })
                    .collect(),
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[TypeEntry] {
        &self.entries
    }

    pub fn set_enabled(&mut self, kind: QuestionKind, enabled: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.kind == kind) {
            entry.enabled = enabled;
        }
    }

    /// Enable exactly the listed types.
    pub fn enable_only(&mut self, kinds: &[QuestionKind]) {
        for entry in &mut self.entries {
            entry.enabled = kinds.contains(&entry.kind);
        }
    }

    pub fn is_enabled(&self, kind: QuestionKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind && e.enabled)
    }

    pub fn enabled_kinds(&self) -> Vec<QuestionKind> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.kind)
            .collect()
    }

    /// Number of exercises of one type.
    pub fn count(&self, kind: QuestionKind) -> usize {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map_or(0, |e| e.exercises.len())
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.exercises.len()).sum()
    }

    /// Look up an exercise of any type.
    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.entries.iter().find_map(|e| e.exercises.get(id))
    }

    /// Union of the enabled types' exercises, as sampling candidates.
    pub fn pool(&self) -> Vec<Candidate> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .flat_map(|e| e.exercises.iter())
            .map(|(id, exercise)| Candidate::new(id.clone(), exercise.record.weight))
            .collect()
    }
}
