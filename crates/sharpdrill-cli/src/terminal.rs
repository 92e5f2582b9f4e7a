//! Colored terminal console.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use colored::{Color, ColoredString, Colorize};

use sharpdrill_core::config::ThemeName;
use sharpdrill_core::console::{Console, Tone};
use sharpdrill_core::error::DrillError;

/// Colors for each output tone.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    plain: Color,
    right: Color,
    wrong: Color,
    accent: Color,
}

impl Theme {
    pub fn preset(name: ThemeName) -> Self {
        let (plain, right, wrong, accent) = match name {
            ThemeName::Original => (Color::Yellow, Color::Green, Color::Red, Color::Magenta),
            ThemeName::Programmer => (Color::Green, Color::Blue, Color::Red, Color::Magenta),
            ThemeName::Marine => (Color::Blue, Color::Cyan, Color::Magenta, Color::Cyan),
            ThemeName::Clear => (Color::Black, Color::Green, Color::Red, Color::Magenta),
        };
        Self {
            plain,
            right,
            wrong,
            accent,
        }
    }

    pub fn color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Plain => self.plain,
            Tone::Right => self.right,
            Tone::Wrong => self.wrong,
            Tone::Accent => self.accent,
        }
    }

    pub fn paint(&self, tone: Tone, text: &str) -> ColoredString {
        text.color(self.color(tone))
    }
}

/// [`Console`] over stdin/stdout.
pub struct TerminalConsole {
    theme: Theme,
}

impl TerminalConsole {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", self.theme.paint(Tone::Plain, prompt))?;
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            println!();
            return Err(DrillError::InputClosed.into());
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn show(&mut self, tone: Tone, text: &str) {
        println!("{}", self.theme.paint(tone, text));
    }
}
