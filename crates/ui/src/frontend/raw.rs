use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::KeyEventKind;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use hotkeys_core::model::LearningStats;
use services::QuizQuestion;

use super::keys::{KeyInput, KeySource, TerminalKeys, collect_answer, map_key};
use super::{AnswerInput, Frontend, KEYS_NOTE, Pause, Tone};
use crate::error::FrontendError;

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Regular => Color::White,
        Tone::Question => Color::Blue,
        Tone::Success => Color::Green,
        Tone::Error => Color::Magenta,
        Tone::Statistics => Color::Cyan,
    }
}

/// Leaves raw mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Keystroke front end: answers are captured key by key in raw mode.
pub struct KeysFrontend<S, W> {
    keys: S,
    output: W,
    // Reprinted on top of every cleared question screen.
    stats: Option<String>,
    _raw: Option<RawModeGuard>,
}

impl KeysFrontend<TerminalKeys, Stdout> {
    /// Put the controlling terminal in raw mode and read keys from it.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if raw mode cannot be enabled.
    pub fn terminal() -> Result<Self, FrontendError> {
        let guard = RawModeGuard::enable()?;
        Ok(Self {
            keys: TerminalKeys,
            output: io::stdout(),
            stats: None,
            _raw: Some(guard),
        })
    }
}

impl<S: KeySource, W: Write> KeysFrontend<S, W> {
    /// Front end over arbitrary key and output streams (no raw mode).
    pub fn with_streams(keys: S, output: W) -> Self {
        Self {
            keys,
            output,
            stats: None,
            _raw: None,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn write_lines(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        queue!(self.output, SetForegroundColor(tone_color(tone)))?;
        for line in text.lines() {
            queue!(self.output, Print(line), Print("\r\n"))?;
        }
        queue!(self.output, ResetColor)?;
        self.output.flush()
    }

    fn wait_for_key(&mut self, prompt: &str) -> Result<(), FrontendError> {
        execute!(self.output, Print(prompt))?;
        while let Some(key) = self.keys.next_key()? {
            if key.kind != KeyEventKind::Release {
                break;
            }
        }
        execute!(self.output, Print("\r\n"))?;
        Ok(())
    }
}

impl<S: KeySource, W: Write> Frontend for KeysFrontend<S, W> {
    fn input_notes(&self, _question: &QuizQuestion) -> Vec<String> {
        vec![KEYS_NOTE.to_string()]
    }

    fn show_stats(&mut self, stats: &LearningStats) -> Result<(), FrontendError> {
        let line = stats.to_string();
        self.write_lines(&line, Tone::Statistics)?;
        self.stats = Some(line);
        Ok(())
    }

    fn show_question(&mut self, text: &str) -> Result<(), FrontendError> {
        execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        if let Some(stats) = self.stats.take() {
            self.write_lines(&stats, Tone::Statistics)?;
            self.stats = Some(stats);
        }
        self.write_lines(text, Tone::Question)?;
        Ok(())
    }

    fn show_message(&mut self, text: &str, tone: Tone) -> Result<(), FrontendError> {
        self.write_lines(text, tone)?;
        Ok(())
    }

    fn read_answer(&mut self) -> Result<AnswerInput, FrontendError> {
        execute!(self.output, Print("> "))?;
        let output = &mut self.output;
        let input = collect_answer(&mut self.keys, |typed| {
            execute!(output, Print("\r"), Clear(ClearType::CurrentLine), Print("> "), Print(typed))
        })?;
        execute!(self.output, Print("\r\n"))?;
        Ok(input)
    }

    fn read_choice(&mut self, prompt: &str) -> Result<Option<String>, FrontendError> {
        execute!(self.output, Print(prompt))?;
        while let Some(key) = self.keys.next_key()? {
            match map_key(&key) {
                KeyInput::Step(step) => {
                    execute!(self.output, Print(&step), Print("\r\n"))?;
                    return Ok(Some(step));
                }
                KeyInput::Exit => break,
                _ => {}
            }
        }
        execute!(self.output, Print("\r\n"))?;
        Ok(None)
    }

    fn pause(&mut self, at: Pause) -> Result<(), FrontendError> {
        match at {
            Pause::AfterHelp | Pause::AfterAnswer => self.wait_for_key("Press any key to continue"),
            Pause::BeforeExit => self.wait_for_key("Press any key to exit"),
        }
    }
}
