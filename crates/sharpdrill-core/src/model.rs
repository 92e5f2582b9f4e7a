//! Core data model types for sharpdrill.
//!
//! These are the fundamental types shared by the record store, the material
//! catalog and the question engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DrillError;

/// Weight given to an item that has never been asked. Equivalent to having
/// been asked twice without a single correct answer.
pub const INITIAL_WEIGHT: f64 = 2.0;

/// Upper bound on the number of digits of the question count of a drill.
pub const QUESTION_COUNT_DIGITS: u32 = 2;

/// Largest number of questions a single drill may ask.
pub const MAX_QUESTIONS: usize = 10usize.pow(QUESTION_COUNT_DIGITS) - 1;

/// Grammatical gender of a noun, as written in the material file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Masculine,
    #[serde(rename = "f")]
    Feminine,
    #[serde(rename = "n")]
    Neuter,
    #[serde(rename = "p")]
    Plural,
}

impl Gender {
    /// One-letter code the user is expected to type.
    pub fn code(self) -> &'static str {
        match self {
            Gender::Masculine => "m",
            Gender::Feminine => "f",
            Gender::Neuter => "n",
            Gender::Plural => "p",
        }
    }

    /// Definite article in the nominative.
    pub fn article(self) -> &'static str {
        match self {
            Gender::Masculine => "der",
            Gender::Feminine | Gender::Plural => "die",
            Gender::Neuter => "das",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(Gender::Masculine),
            "f" => Ok(Gender::Feminine),
            "n" => Ok(Gender::Neuter),
            "p" => Ok(Gender::Plural),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

/// The kinds of question a drill can ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "Noun", alias = "noun")]
    Noun,
    #[serde(rename = "Verb", alias = "verb")]
    Verb,
    #[serde(
        rename = "Adjective+preposition",
        alias = "adjective+preposition",
        alias = "adjective-preposition"
    )]
    AdjectivePreposition,
}

impl QuestionKind {
    /// All kinds, in the order they are displayed and asked about.
    pub const ALL: [QuestionKind; 3] = [
        QuestionKind::Noun,
        QuestionKind::Verb,
        QuestionKind::AdjectivePreposition,
    ];

    /// Name used as the bucket key in the material file.
    pub fn name(self) -> &'static str {
        match self {
            QuestionKind::Noun => "Noun",
            QuestionKind::Verb => "Verb",
            QuestionKind::AdjectivePreposition => "Adjective+preposition",
        }
    }

    /// Whether the kind is part of a drill unless configured otherwise.
    pub fn enabled_by_default(self) -> bool {
        !matches!(self, QuestionKind::Verb)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuestionKind {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "noun" => Ok(QuestionKind::Noun),
            "verb" => Ok(QuestionKind::Verb),
            "adjective+preposition" | "adjective-preposition" | "adjprep" => {
                Ok(QuestionKind::AdjectivePreposition)
            }
            _ => Err(DrillError::UnknownQuestionType(s.to_string())),
        }
    }
}

/// Performance history of one item.
///
/// Persisted as the array `[correct, total, weight]`. The weight is derived:
/// after every update it equals `total / (1 + correct^2)`. A record that was
/// never updated carries [`INITIAL_WEIGHT`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, u32, f64)", into = "(f64, u32, f64)")]
pub struct Record {
    /// Accumulated score mass; half points are allowed.
    pub correct: f64,
    /// Number of times the item was asked.
    pub total: u32,
    /// Unnormalized selection weight.
    pub weight: f64,
}

impl Record {
    /// The record of an item that was never asked.
    pub fn fresh() -> Self {
        Self {
            correct: 0.0,
            total: 0,
            weight: INITIAL_WEIGHT,
        }
    }

    /// Fold one observed score into the record and recompute the weight.
    pub fn apply_score(&mut self, score: f64) {
        self.correct += score;
        self.total += 1;
        self.weight = weight_for(self.correct, self.total);
    }

    /// Fraction of the asked times that were answered correctly.
    pub fn accuracy(&self) -> Option<f64> {
        (self.total > 0).then(|| self.correct / f64::from(self.total))
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::fresh()
    }
}

impl TryFrom<(f64, u32, f64)> for Record {
    type Error = DrillError;

    fn try_from((correct, total, weight): (f64, u32, f64)) -> Result<Self, Self::Error> {
        if !correct.is_finite() || correct < 0.0 {
            return Err(DrillError::InvalidRecord(format!(
                "correct count must be a non-negative number, got {correct}"
            )));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(DrillError::InvalidRecord(format!(
                "weight must be a non-negative number, got {weight}"
            )));
        }
        Ok(Self {
            correct,
            total,
            weight,
        })
    }
}

impl From<Record> for (f64, u32, f64) {
    fn from(record: Record) -> Self {
        (record.correct, record.total, record.weight)
    }
}

/// The weight recurrence: exposure raises the weight, correctness lowers it
/// quadratically.
pub fn weight_for(correct: f64, total: u32) -> f64 {
    f64::from(total) / (1.0 + correct * correct)
}
