//! Terminal front-end: the menu loop that drives the navigator.
//!
//! Generic over any `BufRead`/`Write` pair so the whole flow can run against
//! scripted input and a byte buffer.

use crate::app::Navigator;
use crate::core::ChatClient;
use crate::encyclopedia::EncyclopediaService;
use crate::error::SessionError;
use crate::quiz::{AnswerLabel, Quiz, QuizQuestion};
use crate::resolver::LookupOutcome;
use crate::session::{AnswerSource, FeedbackTier, QuizSession, QuizSessionResult};
use crate::summary::SUMMARY_APOLOGY;
use crossterm::style::{Color, Stylize};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// A menu choice as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Search,
    Quit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Search),
            "2" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// `true` for an affirmative answer to a yes/no prompt (English or German).
pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes" | "j" | "ja")
}

/// Greedy word wrap to `width` columns; blank lines separate paragraphs.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split("\n\n") {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() { word.chars().count() } else { line.chars().count() + 1 + word.chars().count() };
            if needed > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

pub struct Console<R: BufRead, W: Write> {
    input: R,
    out: W,
    width: usize,
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W, width: usize) -> Self {
        Self { input, out, width, color: true }
    }

    /// Plain output without ANSI color codes.
    #[must_use]
    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn say(&mut self, text: &str, color: Color) -> io::Result<()> {
        let painted = self.paint(text, color);
        writeln!(self.out, "{painted}")
    }

    fn banner(&mut self, title: &str) -> io::Result<()> {
        let rule = "=".repeat(self.width);
        let centered = format!("{:^width$}", title, width = self.width);
        let heading = if self.color { centered.bold().with(Color::Cyan).to_string() } else { centered };
        self.say(&rule, Color::Cyan)?;
        writeln!(self.out, "{heading}")?;
        self.say(&rule, Color::Cyan)
    }

    /// Print `prompt` and read one line; `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let painted = self.paint(prompt, Color::Green);
        write!(self.out, "{painted}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// The menu loop. Returns when the user quits or input ends.
    pub async fn run<E, C>(&mut self, navigator: &Navigator<E, C>) -> io::Result<()>
    where
        E: EncyclopediaService,
        C: ChatClient + Clone,
    {
        self.banner("Welcome to the Wikipedia knowledge navigator")?;

        loop {
            writeln!(self.out)?;
            self.say("Please choose an option:", Color::Yellow)?;
            self.say("1. Search an article", Color::Yellow)?;
            self.say("2. Quit", Color::Yellow)?;

            let Some(choice) = self.prompt("Your choice: ")? else {
                break;
            };
            match MenuChoice::parse(&choice) {
                Some(MenuChoice::Search) => self.handle_search(navigator).await?,
                Some(MenuChoice::Quit) => break,
                None => self.say("Invalid input. Please choose 1 or 2.", Color::Red)?,
            }
        }

        writeln!(self.out)?;
        self.say("Goodbye!", Color::Cyan)
    }

    pub async fn handle_search<E, C>(&mut self, navigator: &Navigator<E, C>) -> io::Result<()>
    where
        E: EncyclopediaService,
        C: ChatClient + Clone,
    {
        let Some(topic) = self.prompt("Enter a topic: ")? else {
            return Ok(());
        };
        let topic = topic.trim();
        if topic.is_empty() {
            debug!("blank topic rejected");
            return self.say("Please enter a topic.", Color::Red);
        }

        self.say(&format!("Searching Wikipedia for '{topic}'..."), Color::Blue)?;
        info!(topic, "search requested");

        match navigator.resolve(topic).await {
            LookupOutcome::Resolved { title, content, url } => {
                self.say(&format!("Summarizing '{title}'..."), Color::Magenta)?;
                let summary = navigator.summarize(&content).await;
                self.show_summary(&summary, &url)?;

                if summary.starts_with(SUMMARY_APOLOGY) {
                    return Ok(());
                }
                let Some(answer) = self.prompt("Would you like a short quiz? (y/n): ")? else {
                    return Ok(());
                };
                if is_yes(&answer) {
                    if let Some(quiz) = navigator.quiz(&summary).await {
                        self.run_quiz(quiz)?;
                    }
                }
                Ok(())
            }
            LookupOutcome::Ambiguous { candidates } => {
                self.say("The topic is ambiguous. Did you mean:", Color::Red)?;
                self.list_candidates(&candidates)
            }
            LookupOutcome::NotFound { candidates } => {
                self.say("No matching article found.", Color::Red)?;
                if candidates.is_empty() {
                    Ok(())
                } else {
                    self.say("Search results:", Color::Red)?;
                    self.list_candidates(&candidates)
                }
            }
            LookupOutcome::ServiceUnavailable { detail } => {
                self.say(&format!("Wikipedia is not reachable right now ({detail})."), Color::Red)
            }
        }
    }

    fn show_summary(&mut self, summary: &str, url: &str) -> io::Result<()> {
        self.banner("SUMMARY")?;
        for line in wrap_text(summary, self.width) {
            writeln!(self.out, "{line}")?;
        }
        self.say(&"=".repeat(self.width), Color::Cyan)?;
        writeln!(self.out)?;
        self.say("The full article is here:", Color::Yellow)?;
        self.say(url, Color::Blue)?;
        writeln!(self.out)
    }

    fn list_candidates(&mut self, candidates: &[String]) -> io::Result<()> {
        for candidate in candidates {
            self.say(&format!("  - {candidate}"), Color::White)?;
        }
        Ok(())
    }

    fn run_quiz(&mut self, quiz: Quiz) -> io::Result<()> {
        writeln!(self.out)?;
        self.banner("QUIZ")?;
        self.say("Answer each question with A, B, C or D.", Color::Yellow)?;

        match QuizSession::new(quiz).run(self) {
            Ok(result) => {
                self.show_result(&result)?;
                writeln!(self.out)?;
                // Any line, or end of input, returns to the menu
                self.prompt("Press Enter to return to menu...")?;
                Ok(())
            }
            Err(SessionError::InputClosed(question)) => {
                debug!(question, "input closed during quiz");
                Ok(())
            }
            Err(SessionError::Io(e)) => Err(e),
        }
    }

    fn show_result(&mut self, result: &QuizSessionResult) -> io::Result<()> {
        writeln!(self.out)?;
        self.banner("RESULT")?;
        writeln!(
            self.out,
            "Correct: {}/{} ({}%)",
            result.correct_count,
            result.total_count,
            result.percent()
        )?;
        let color = match result.tier() {
            FeedbackTier::Positive => Color::Green,
            FeedbackTier::Neutral => Color::Yellow,
            FeedbackTier::Encouragement => Color::Red,
        };
        self.say(result.tier().message(), color)
    }
}

impl<R: BufRead, W: Write> AnswerSource for Console<R, W> {
    fn present(&mut self, index: usize, question: &QuizQuestion) -> io::Result<()> {
        writeln!(self.out)?;
        let heading = format!("Q{}: {}", index + 1, question.prompt);
        self.say(&heading, Color::White)?;
        for label in AnswerLabel::ALL {
            writeln!(self.out, "{label}) {}", question.option(label))?;
        }
        Ok(())
    }

    fn read_answer(&mut self, index: usize) -> io::Result<Option<String>> {
        self.prompt(&format!("Your answer for Q{}: ", index + 1))
    }

    fn reject(&mut self, _input: &str) -> io::Result<()> {
        self.say("Please enter only A, B, C or D.", Color::Red)
    }
}
