//! Drill orchestrator.
//!
//! A drill goes through: settings -> selection -> asking -> score summary ->
//! optional review -> persisting (skipped in casual mode).

use anyhow::Result;
use rand::Rng;

use crate::casual::CasualMode;
use crate::console::{Console, Tone};
use crate::error::DrillError;
use crate::grading::{feedback, grade, praise};
use crate::model::{QuestionKind, Record, MAX_QUESTIONS};
use crate::question::{Outcome, Question};
use crate::records::{update, RecordStore};
use crate::registry::Registry;
use crate::sampler::{clamp_count, sample};

/// Resolved settings of one drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillSettings {
    /// Requested number of questions, `1..=MAX_QUESTIONS`.
    pub questions: usize,
    /// Offer the review phase at the end.
    pub review: bool,
}

impl DrillSettings {
    pub fn new(questions: usize, review: bool) -> Result<Self, DrillError> {
        if !(1..=MAX_QUESTIONS).contains(&questions) {
            return Err(DrillError::InvalidSettings(format!(
                "number of questions must be between 1 and {MAX_QUESTIONS}, got {questions}"
            )));
        }
        Ok(Self { questions, review })
    }
}

/// Show the current settings and let the user change them.
///
/// An empty answer keeps everything. Otherwise the question count, the
/// review flag and each question type are asked for in turn.
pub fn configure(
    console: &mut dyn Console,
    settings: DrillSettings,
    registry: &mut Registry,
) -> Result<DrillSettings> {
    let enabled: Vec<&str> = registry
        .enabled_kinds()
        .into_iter()
        .map(QuestionKind::name)
        .collect();
    console.say("Current settings:");
    console.say(&format!("    * number of questions: {}", settings.questions));
    console.say(&format!("    * review afterwards: {}", settings.review));
    console.say(&format!("    * question types: {}", enabled.join(", ")));
    console.say("");

    if console
        .read_line("ENTER to continue, anything else to change: ")?
        .is_empty()
    {
        return Ok(settings);
    }

    let questions = console.number_in_range(
        &format!("    * Enter the number of questions (1 to {MAX_QUESTIONS}): "),
        1,
        MAX_QUESTIONS,
    )?;
    let review = console.yes_no("    * Give the option to review at the end? [yes, no]: ")?;
    console.say("    * Select which types of questions you want [yes, no]:");
    for kind in QuestionKind::ALL {
        let wanted = console.yes_no(&format!("        - {kind}: "))?;
        registry.set_enabled(kind, wanted);
    }

    Ok(DrillSettings { questions, review })
}

/// What happened to one selected item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemResult {
    pub id: String,
    pub kind: QuestionKind,
    pub outcome: Outcome,
    pub brief: String,
}

/// Summary of a finished drill.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillReport {
    /// Selected items in the order they were asked.
    pub items: Vec<ItemResult>,
    /// Sum of the scores of graded items.
    pub total_score: f64,
    /// Number of items that produced a score.
    pub graded: usize,
    /// `100 * total_score / items.len()`; absent when nothing was asked.
    pub grade: Option<f64>,
    /// Whether the scores were written to the record store.
    pub persisted: bool,
}

/// Runs drills against a record store.
pub struct DrillEngine {
    store: RecordStore,
    casual: CasualMode,
}

impl DrillEngine {
    pub fn new(store: RecordStore, casual: CasualMode) -> Self {
        Self { store, casual }
    }

    /// Run one drill with already resolved settings.
    pub fn run<R: Rng + ?Sized>(
        &self,
        registry: &Registry,
        settings: &DrillSettings,
        console: &mut dyn Console,
        rng: &mut R,
    ) -> Result<DrillReport> {
        let selected = select(registry, settings.questions, console, rng)?;
        if selected.is_empty() {
            return Ok(DrillReport {
                items: Vec::new(),
                total_score: 0.0,
                graded: 0,
                grade: None,
                persisted: false,
            });
        }

        let mut items = Vec::with_capacity(selected.len());
        let mut total_score = 0.0;
        let mut graded = 0usize;

        for (id, question) in &selected {
            let outcome = question.ask(console, rng)?;
            if let Outcome::Scored(score) = outcome {
                let (tone, message) = feedback(score);
                console.show(tone, &format!("    -> {message}"));
                console.say("");
                total_score += score;
                graded += 1;
            }
            items.push(ItemResult {
                id: id.clone(),
                kind: question.kind(),
                outcome,
                brief: question.brief(),
            });
        }

        // Inert items add nothing to the total but still count as asked.
        let asked = items.len();
        let grade = grade(total_score, asked);
        if let Some(g) = grade {
            console.say(&format!(
                "Final score: {total_score} out of {asked} ({}%). {}",
                g as i64,
                praise(g)
            ));
        }

        if settings.review {
            review(console, &items, total_score, grade)?;
        }

        let persisted = self.persist(console, &items)?;

        Ok(DrillReport {
            items,
            total_score,
            graded,
            grade,
            persisted,
        })
    }

    /// Write the scores back unless casual mode is on at this moment.
    fn persist(&self, console: &mut dyn Console, items: &[ItemResult]) -> Result<bool> {
        if self.casual.is_active() {
            console.show(Tone::Accent, "Casual mode is on: records not saved");
            tracing::info!("casual mode, skipping record update");
            return Ok(false);
        }

        console.say("Saving records, please do not exit now...");
        let mut records = self.store.load()?;
        for item in items {
            let Some(score) = item.outcome.score() else {
                continue;
            };
            if !records.contains_key(&item.id) {
                tracing::warn!("item {} vanished from the records, re-adding it", item.id);
                records.insert(item.id.clone(), Record::fresh());
            }
            records = update(records, &item.id, score)?;
        }
        self.store.save(&records)?;
        console.say("Records saved");

        Ok(true)
    }
}

/// Draw the questions of a drill from the enabled types.
fn select<R: Rng + ?Sized>(
    registry: &Registry,
    requested: usize,
    console: &mut dyn Console,
    rng: &mut R,
) -> Result<Vec<(String, Question)>> {
    let pool = registry.pool();
    if pool.is_empty() {
        console.show(
            Tone::Wrong,
            "/!\\ No questions available for the selected question types",
        );
        return Ok(Vec::new());
    }

    let clamped = clamp_count(requested, pool.len());
    if clamped.reduced {
        tracing::warn!(requested, available = pool.len(), "drill reduced");
        console.say(&format!(
            "/!\\ Number of requested questions ({requested}) larger than that of available ones ({})",
            pool.len()
        ));
        console.say(&format!("    Drill reduced to {} questions", clamped.count));
        console.say("");
    }

    sample(&pool, clamped.count, rng)?
        .into_iter()
        .map(|id| -> Result<(String, Question)> {
            let exercise = registry
                .exercise(&id)
                .ok_or_else(|| DrillError::UnknownItem(id.clone()))?;
            let question = Question::from_material(&exercise.material);
            Ok((id, question))
        })
        .collect()
}

/// Free-recall phase: one sentence per question, an empty line stops early.
/// The briefs of all selected questions are shown afterwards regardless.
fn review(
    console: &mut dyn Console,
    items: &[ItemResult],
    total_score: f64,
    grade: Option<f64>,
) -> Result<()> {
    if !console.yes_no("Move on to review? (yes, no): ")? {
        return Ok(());
    }

    console.say("");
    if let Some(g) = grade {
        console.say(&format!(
            "Score: {total_score} out of {} ({}%)",
            items.len(),
            g as i64
        ));
        console.say("");
    }
    console.say("In order to review, enter a sentence involving each of the previous questions");
    console.say("If at some point you cannot remember any more questions, enter an empty line to finish");

    for i in 1..=items.len() {
        if console.read_line(&format!("{:4}", format!("{i}:")))?.is_empty() {
            break;
        }
    }

    console.say("");
    console.say("The concepts featured in the questions were: ");
    for (i, item) in items.iter().enumerate() {
        console.say(&format!("{:4}{}", format!("{}.", i + 1), item.brief));
    }

    Ok(())
}
