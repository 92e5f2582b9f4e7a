//! Interactive I/O seam.
//!
//! The question engine and the drill orchestrator never touch the terminal
//! directly; they go through a [`Console`]. The CLI provides a colored
//! terminal implementation and tests use [`crate::mock::ScriptedConsole`].

use anyhow::Result;

/// How a line of output should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Regular text.
    Plain,
    /// Confirmation of a correct answer.
    Right,
    /// Correction of a wrong answer.
    Wrong,
    /// Highlights such as the casual-mode banner.
    Accent,
}

/// Line-based prompt and display collaborator.
pub trait Console {
    /// Show `prompt` and read one line of input, without the line ending.
    ///
    /// Fails with [`crate::error::DrillError::InputClosed`] once input is
    /// exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Show one line of output.
    fn show(&mut self, tone: Tone, text: &str);

    /// Show one line of plain output.
    fn say(&mut self, text: &str) {
        self.show(Tone::Plain, text);
    }

    /// Re-prompt until the lowercased answer is one of `options`.
    fn choose(&mut self, prompt: &str, options: &[&str]) -> Result<String> {
        loop {
            let answer = self.read_line(prompt)?.to_lowercase();
            if options.contains(&answer.as_str()) {
                return Ok(answer);
            }
        }
    }

    /// Strict yes/no question.
    fn yes_no(&mut self, prompt: &str) -> Result<bool> {
        Ok(self.choose(prompt, &["yes", "no"])? == "yes")
    }

    /// Yes/no question that also accepts `y` and `n`.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.choose(prompt, &["yes", "y", "no", "n"])?;
        Ok(matches!(answer.as_str(), "yes" | "y"))
    }

    /// Re-prompt until the answer is an integer within `min..=max`.
    fn number_in_range(&mut self, prompt: &str, min: usize, max: usize) -> Result<usize> {
        loop {
            let answer = self.read_line(prompt)?;
            if let Ok(n) = answer.trim().parse::<usize>() {
                if (min..=max).contains(&n) {
                    return Ok(n);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrillError;
    use crate::mock::ScriptedConsole;

    #[test]
    fn choose_reprompts_until_recognised() {
        let mut console = ScriptedConsole::new(["maybe", "", "SORTA"]);
        let answer = console.choose("Accept? ", &["yes", "no", "sorta"]).unwrap();
        assert_eq!(answer, "sorta");
        assert_eq!(console.prompts().len(), 3);
    }

    #[test]
    fn confirm_accepts_short_forms() {
        let mut console = ScriptedConsole::new(["y", "N"]);
        assert!(console.confirm("Sure? ").unwrap());
        assert!(!console.confirm("Sure? ").unwrap());
    }

    #[test]
    fn yes_no_rejects_short_forms() {
        let mut console = ScriptedConsole::new(["y", "no"]);
        assert!(!console.yes_no("Review? ").unwrap());
        assert_eq!(console.prompts().len(), 2);
    }

    #[test]
    fn number_in_range_skips_garbage_and_out_of_range() {
        let mut console = ScriptedConsole::new(["ten", "0", "100", " 12 "]);
        assert_eq!(console.number_in_range("Count: ", 1, 99).unwrap(), 12);
    }

    #[test]
    fn exhausted_input_is_an_error() {
        let mut console = ScriptedConsole::new(["nope"]);
        let err = console.yes_no("Review? ").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DrillError>(),
            Some(DrillError::InputClosed)
        ));
    }
}
