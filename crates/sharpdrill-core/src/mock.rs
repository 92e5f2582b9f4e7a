//! Scripted console for testing without a terminal.

use std::collections::VecDeque;

use anyhow::Result;

use crate::console::{Console, Tone};
use crate::error::DrillError;

/// A console that replays queued answers and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<(Tone, String)>,
}

impl ScriptedConsole {
    /// Create a console that answers prompts with `answers`, in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Queue more answers.
    pub fn push_answer(&mut self, answer: impl Into<String>) {
        self.answers.push_back(answer.into());
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines shown so far, with their tone.
    pub fn output(&self) -> &[(Tone, String)] {
        &self.output
    }

    /// Whether any shown line contains `needle`.
    pub fn shown(&self, needle: &str) -> bool {
        self.output.iter().any(|(_, line)| line.contains(needle))
    }

    /// Number of answers not consumed yet.
    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| DrillError::InputClosed.into())
    }

    fn show(&mut self, tone: Tone, text: &str) {
        self.output.push((tone, text.to_string()));
    }
}
