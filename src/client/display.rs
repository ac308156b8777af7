//! Terminal rendering for the review client
//!
//! Messages are printed in the colour of their level; the busy indicator is drawn on its own
//! line and wiped once the service answers.

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Stdout, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackLevel {
    Success,
    Error,
    Warning,
}

impl FeedbackLevel {
    fn color(self) -> Color {
        match self {
            FeedbackLevel::Success => Color::Green,
            FeedbackLevel::Error => Color::Red,
            FeedbackLevel::Warning => Color::Yellow,
        }
    }
}

/// One message shown to the user after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub text: String,
}

impl Feedback {
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: FeedbackLevel::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: FeedbackLevel::Error, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: FeedbackLevel::Warning, text: text.into() }
    }
}

/// Writes styled output to any terminal-like sink
pub struct Display<W: Write> {
    out: W,
}

impl Display<Stdout> {
    pub fn stdout() -> Self {
        Display { out: io::stdout() }
    }
}

impl<W: Write> Display<W> {
    pub fn new(out: W) -> Self {
        Display { out }
    }

    pub fn show(&mut self, feedback: &Feedback) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(feedback.level.color()),
            Print(&feedback.text),
            ResetColor,
            Print("\n")
        )?;
        self.out.flush()
    }

    pub fn show_title(&mut self, title: &str) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(Color::Magenta),
            Print(title),
            ResetColor,
            Print("\n\n")
        )?;
        self.out.flush()
    }

    pub fn prompt(&mut self, label: &str) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(Color::DarkGrey), Print(label), ResetColor, Print("\n"))?;
        self.out.flush()
    }

    pub fn show_busy(&mut self, label: &str) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(Color::DarkGrey), Print(label), ResetColor)?;
        self.out.flush()
    }

    pub fn clear_busy(&mut self) -> io::Result<()> {
        queue!(self.out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
