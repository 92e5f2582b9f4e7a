//! Score tables: partial-credit aggregation, self-grading, per-question
//! feedback and the end-of-drill praise tiers.

use crate::console::Tone;

/// Answers accepted when the user grades their own translation, with the
/// score each one is worth.
pub const SELF_GRADES: [(&str, f64); 3] = [("yes", 1.0), ("no", 0.0), ("sorta", 0.5)];

/// Score of a self-grading answer, if it is one of [`SELF_GRADES`].
pub fn self_grade_score(answer: &str) -> Option<f64> {
    SELF_GRADES
        .iter()
        .find(|(name, _)| *name == answer)
        .map(|(_, score)| *score)
}

/// Combine the sub-answers of one question into its score.
///
/// All parts right or all parts wrong gives the plain average (1 or 0); any
/// mixture is worth exactly half a point, however the parts split.
pub fn all_or_nothing_or_half(parts: &[f64]) -> f64 {
    if parts.is_empty() {
        return 0.0;
    }
    let sum: f64 = parts.iter().sum();
    let len = parts.len() as f64;
    if sum == 0.0 || sum == len {
        sum / len
    } else {
        0.5
    }
}

/// Feedback line shown after a question has been scored.
pub fn feedback(score: f64) -> (Tone, &'static str) {
    if score >= 1.0 {
        (Tone::Right, "Correct! One point")
    } else if score > 0.0 {
        (Tone::Plain, "So-so: half a point")
    } else {
        (Tone::Wrong, "Whoops, incorrect: no points")
    }
}

/// Percentage grade of a drill over every asked question. `None` when
/// nothing was asked.
pub fn grade(total_score: f64, asked: usize) -> Option<f64> {
    (asked > 0).then(|| 100.0 * total_score / asked as f64)
}

/// Praise tier for a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PraiseTier {
    /// Below 40.
    Dismal,
    /// 40 up to 60.
    Poor,
    /// 60 up to 80.
    Fair,
    /// 80 up to 90.
    Good,
    /// 90 up to, but not including, 100.
    Great,
    /// Exactly 100.
    Flawless,
}

impl PraiseTier {
    /// Tier of `grade`, or `None` outside `0..=100`.
    pub fn for_grade(grade: f64) -> Option<Self> {
        if !(0.0..=100.0).contains(&grade) {
            return None;
        }
        Some(if grade < 40.0 {
            PraiseTier::Dismal
        } else if grade < 60.0 {
            PraiseTier::Poor
        } else if grade < 80.0 {
            PraiseTier::Fair
        } else if grade < 90.0 {
            PraiseTier::Good
        } else if grade < 100.0 {
            PraiseTier::Great
        } else {
            PraiseTier::Flawless
        })
    }

    pub fn message(self) -> &'static str {
        match self {
            PraiseTier::Dismal => "Ouch. Those words will be back soon, and often.",
            PraiseTier::Poor => "Not quite ready to move to Berlin yet.",
            PraiseTier::Fair => "Need to work on these a bit more!",
            PraiseTier::Good => "Good job! Practice makes perfect though.",
            PraiseTier::Great => "Amazing, you walking dictionary.",
            PraiseTier::Flawless => "Flawless! Keep it up!",
        }
    }
}

/// Banner for the end of a drill.
pub fn praise(grade: f64) -> String {
    match PraiseTier::for_grade(grade) {
        Some(tier) => tier.message().to_string(),
        None => format!("Whoops! Invalid grade: {grade}"),
    }
}
