//! Drill error types.
//!
//! These errors represent the failures of the core that callers may want to
//! match on. File and parse failures travel as `anyhow::Error` with context
//! instead; see [`crate::records`] and [`crate::catalog`].

use thiserror::Error;

/// Errors raised by the sampling, scoring and record-keeping engine.
#[derive(Debug, Error)]
pub enum DrillError {
    /// A candidate carried a negative or non-finite weight.
    #[error("invalid weight {weight} for item {id}")]
    InvalidWeight { id: String, weight: f64 },

    /// More items were requested than the pool holds.
    #[error("cannot sample {requested} items from a pool of {available}")]
    SampleTooLarge { requested: usize, available: usize },

    /// The item id is not present in the record store.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// The material file names a question type that does not exist.
    #[error("unknown question type: {0}")]
    UnknownQuestionType(String),

    /// A material entry could not be turned into a question.
    #[error("invalid material for item {id}: {reason}")]
    InvalidMaterial { id: String, reason: String },

    /// A stored record violates the record invariants.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Drill settings out of their allowed range.
    #[error("invalid drill settings: {0}")]
    InvalidSettings(String),

    /// The input stream ended while an answer was expected.
    #[error("input closed while waiting for an answer")]
    InputClosed,
}

impl DrillError {
    /// Returns `true` if the error was caused by the material file rather
    /// than by the records or the session.
    pub fn is_material_error(&self) -> bool {
        matches!(
            self,
            DrillError::UnknownQuestionType(_) | DrillError::InvalidMaterial { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = DrillError::InvalidWeight {
            id: "1001".into(),
            weight: -1.0,
        };
        assert_eq!(err.to_string(), "invalid weight -1 for item 1001");

        let err = DrillError::SampleTooLarge {
            requested: 5,
            available: 3,
        };
        assert!(err.to_string().contains("pool of 3"));
    }

    #[test]
    fn material_errors_are_classified() {
        assert!(DrillError::UnknownQuestionType("Idiom".into()).is_material_error());
        assert!(!DrillError::UnknownItem("1001".into()).is_material_error());
        assert!(!DrillError::InputClosed.is_material_error());
    }
}
