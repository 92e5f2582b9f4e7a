//! Question variants: presentation, scoring and one-line summaries.

use anyhow::Result;
use rand::Rng;

use crate::catalog::{AdjectivePrepositionMaterial, Material, NounMaterial, VerbMaterial};
use crate::console::{Console, Tone};
use crate::grading::{all_or_nothing_or_half, self_grade_score, SELF_GRADES};
use crate::model::QuestionKind;

/// Result of asking one question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The question was scored: 0, 0.5 or 1.
    Scored(f64),
    /// The question type has no exercise; nothing was asked or scored.
    Inert,
}

impl Outcome {
    pub fn score(self) -> Option<f64> {
        match self {
            Outcome::Scored(score) => Some(score),
            Outcome::Inert => None,
        }
    }
}

/// Direction of a noun translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NounMode {
    /// German word shown, meaning asked.
    ToNative,
    /// Meaning shown, German word asked.
    FromNative,
}

/// A question ready to be asked: one material item and the exercise it
/// drives.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    material: Material,
}

impl Question {
    /// Instantiate the question for one material item.
    pub fn from_material(material: &Material) -> Self {
        Self {
            material: material.clone(),
        }
    }

    pub fn kind(&self) -> QuestionKind {
        self.material.kind()
    }

    /// Present the question and score the answers. Noun questions pick their
    /// direction at random.
    pub fn ask<R: Rng + ?Sized>(&self, console: &mut dyn Console, rng: &mut R) -> Result<Outcome> {
        match &self.material {
            Material::Noun(q) => {
                let mode = if rng.gen_bool(0.5) {
                    NounMode::ToNative
                } else {
                    NounMode::FromNative
                };
                q.ask(console, mode).map(Outcome::Scored)
            }
            Material::Verb(q) => Ok(q.ask()),
            Material::AdjectivePreposition(q) => q.ask(console).map(Outcome::Scored),
        }
    }

    /// One-line summary shown after the review.
    pub fn brief(&self) -> String {
        match &self.material {
            Material::Noun(q) => q.brief(),
            Material::Verb(q) => q.brief(),
            Material::AdjectivePreposition(q) => q.brief(),
        }
    }
}

impl NounMaterial {
    /// Ask meaning or translation, then gender, then plural.
    pub fn ask(&self, console: &mut dyn Console, mode: NounMode) -> Result<f64> {
        let primary = self.meanings.first().map(String::as_str).unwrap_or_default();

        let first = match mode {
            NounMode::ToNative => {
                console.say(&format!("[*] Translate (DE -> EN): {}", self.noun));
                self.ask_meaning(console)?
            }
            NounMode::FromNative => {
                console.say(&format!("[*] Translate (EN -> DE): {primary}"));
                ask_exact(console, "    Translation: ", &self.noun)?
            }
        };
        let gender = ask_exact(console, "    Gender (m, f, n, p): ", self.gender.code())?;
        let plural = ask_exact(console, "    Plural: ", &self.plural)?;

        Ok(all_or_nothing_or_half(&[first, gender, plural]))
    }

    /// Accept any listed meaning outright; otherwise let the user grade
    /// their own answer against the list.
    fn ask_meaning(&self, console: &mut dyn Console) -> Result<f64> {
        let answer = console.read_line("    Meaning: ")?;
        if self.meanings.contains(&answer) {
            console.show(Tone::Right, "    Right!");
            return Ok(1.0);
        }

        console.say(&format!("    Possible meanings: {}", self.meanings.join(", ")));
        let options: Vec<&str> = SELF_GRADES.iter().map(|(name, _)| *name).collect();
        let verdict = console.choose(
            &format!("    Accept {answer}? ({}): ", options.join(", ")),
            &options,
        )?;
        Ok(self_grade_score(&verdict).unwrap_or(0.0))
    }

    pub fn brief(&self) -> String {
        format!(
            "{} {} ({}) -> {}",
            self.gender.article(),
            self.noun,
            self.plural,
            self.meanings.first().map(String::as_str).unwrap_or_default()
        )
    }
}

/// Drilling verbs is not implemented yet; asking one is a no-op.
impl VerbMaterial {
    pub fn ask(&self) -> Outcome {
        Outcome::Inert
    }

    pub fn brief(&self) -> String {
        String::new()
    }
}

impl AdjectivePrepositionMaterial {
    /// Ask preposition, then case.
    pub fn ask(&self, console: &mut dyn Console) -> Result<f64> {
        console.say(&format!("[*] Adjective with preposition: {}", self.adjective));
        let preposition = ask_exact(console, "    Preposition: ", &self.preposition)?;
        let case = ask_exact(console, "    Case: ", &self.case)?;
        Ok(all_or_nothing_or_half(&[preposition, case]))
    }

    pub fn brief(&self) -> String {
        format!("{} {} ({})", self.adjective, self.preposition, self.case)
    }
}

/// One sub-question graded by exact match.
fn ask_exact(console: &mut dyn Console, prompt: &str, expected: &str) -> Result<f64> {
    let answer = console.read_line(prompt)?;
    if answer == expected {
        console.show(Tone::Right, "    Right!");
        Ok(1.0)
    } else {
        console.show(Tone::Wrong, &format!("    Whoops, incorrect: {expected}"));
        Ok(0.0)
    }
}
