use std::io::{self, Stdout};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use hotkeys_core::model::LearningStats;
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use services::QuizQuestion;

use super::keys::{KeyInput, KeySource, TerminalKeys, collect_answer, map_key};
use super::{AnswerInput, Frontend, KEYS_NOTE, Pause, STATUS_BAR, Tone};
use crate::error::FrontendError;

fn tone_style(tone: Tone) -> Style {
    let fg = match tone {
        Tone::Regular => Color::White,
        Tone::Question => Color::Blue,
        Tone::Success => Color::Green,
        Tone::Error => Color::Magenta,
        Tone::Statistics => Color::Cyan,
    };
    Style::default().fg(fg)
}

/// Raw mode plus alternate screen, restored when dropped.
struct ScreenGuard;

impl ScreenGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

//
// ─── RENDERING ─────────────────────────────────────────────────────────────────
//

struct ScreenState {
    stats: String,
    blocks: Vec<(String, Tone)>,
    input: Option<String>,
}

fn render(frame: &mut Frame, state: &ScreenState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    frame.render_widget(
        Paragraph::new(state.stats.as_str()).style(tone_style(Tone::Statistics)),
        rows[0],
    );

    let mut lines: Vec<Line> = Vec::new();
    for (i, (text, tone)) in state.blocks.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(
            text.lines()
                .map(|line| Line::from(Span::styled(line.to_string(), tone_style(*tone)))),
        );
    }
    if let Some(typed) = &state.input {
        lines.push(Line::from(Span::styled(
            format!("> {typed}"),
            tone_style(Tone::Regular),
        )));
    }
    let body = centered(rows[1], lines.len());
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        body,
    );

    frame.render_widget(
        Paragraph::new(STATUS_BAR).style(Style::default().fg(Color::Black).bg(Color::White)),
        rows[2],
    );
}

/// Vertically centered slice of `area` tall enough for `line_count` lines.
fn centered(area: Rect, line_count: usize) -> Rect {
    let height = u16::try_from(line_count)
        .unwrap_or(u16::MAX)
        .min(area.height);
    let top = (area.height - height) / 2;
    Rect {
        y: area.y + top,
        height,
        ..area
    }
}

fn redraw<B: Backend>(terminal: &mut Terminal<B>, state: &ScreenState) -> io::Result<()> {
    terminal.draw(|frame| render(frame, state))?;
    Ok(())
}

//
// ─── FRONT END ─────────────────────────────────────────────────────────────────
//

/// Full-screen front end: statistics bar on top, status bar at the bottom,
/// colored blocks centered in between.
pub struct ScreenFrontend<B: Backend, S> {
    terminal: Terminal<B>,
    keys: S,
    state: ScreenState,
    _guard: Option<ScreenGuard>,
}

impl ScreenFrontend<CrosstermBackend<Stdout>, TerminalKeys> {
    /// Take over the controlling terminal.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the terminal cannot be set up.
    pub fn terminal() -> Result<Self, FrontendError> {
        let guard = ScreenGuard::enter()?;
        let mut frontend = Self::with_backend(CrosstermBackend::new(io::stdout()), TerminalKeys)?;
        frontend._guard = Some(guard);
        Ok(frontend)
    }
}

impl<B: Backend, S: KeySource> ScreenFrontend<B, S> {
    /// # Errors
    ///
    /// Returns the I/O error if the backend cannot be initialized.
    pub fn with_backend(backend: B, keys: S) -> Result<Self, FrontendError> {
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            keys,
            state: ScreenState {
                stats: String::new(),
                blocks: Vec::new(),
                input: None,
            },
            _guard: None,
        })
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    fn draw(&mut self) -> io::Result<()> {
        redraw(&mut self.terminal, &self.state)
    }

    fn wait_for_enter(&mut self) -> Result<(), FrontendError> {
        while let Some(key) = self.keys.next_key()? {
            if matches!(map_key(&key), KeyInput::Submit | KeyInput::Exit) {
                break;
            }
        }
        Ok(())
    }
}

impl<B: Backend, S: KeySource> Frontend for ScreenFrontend<B, S> {
    fn input_notes(&self, _question: &QuizQuestion) -> Vec<String> {
        vec![KEYS_NOTE.to_string()]
    }

    fn show_stats(&mut self, stats: &LearningStats) -> Result<(), FrontendError> {
        self.state.stats = stats.to_string();
        self.draw()?;
        Ok(())
    }

    fn show_question(&mut self, text: &str) -> Result<(), FrontendError> {
        self.state.blocks = vec![(text.to_string(), Tone::Question)];
        self.state.input = None;
        self.draw()?;
        Ok(())
    }

    fn show_message(&mut self, text: &str, tone: Tone) -> Result<(), FrontendError> {
        self.state.blocks.push((text.to_string(), tone));
        self.draw()?;
        Ok(())
    }

    fn read_answer(&mut self) -> Result<AnswerInput, FrontendError> {
        self.state.input = Some(String::new());
        self.draw()?;
        let Self {
            terminal,
            keys,
            state,
            ..
        } = self;
        let input = collect_answer(keys, |typed| {
            state.input = Some(typed.to_string());
            redraw(terminal, state)
        })?;
        self.state.input = None;
        Ok(input)
    }

    fn read_choice(&mut self, prompt: &str) -> Result<Option<String>, FrontendError> {
        self.state.blocks.push((prompt.to_string(), Tone::Regular));
        self.draw()?;
        while let Some(key) = self.keys.next_key()? {
            match map_key(&key) {
                KeyInput::Step(step) => return Ok(Some(step)),
                KeyInput::Exit => break,
                _ => {}
            }
        }
        Ok(None)
    }

    fn pause(&mut self, at: Pause) -> Result<(), FrontendError> {
        let text = match at {
            Pause::AfterHelp | Pause::AfterAnswer => "Press ENTER to continue",
            Pause::BeforeExit => "Press ENTER to exit",
        };
        self.state.blocks.push((text.to_string(), Tone::Regular));
        self.draw()?;
        self.wait_for_enter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::keys::script;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    type TestScreen = ScreenFrontend<TestBackend, std::vec::IntoIter<KeyEvent>>;

    fn screen(keys: &[(KeyCode, KeyModifiers)]) -> TestScreen {
        ScreenFrontend::with_backend(TestBackend::new(100, 12), script(keys)).unwrap()
    }

    fn screen_text(fe: &TestScreen) -> String {
        fe.backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol.as_str())
            .collect()
    }

    #[test]
    fn draws_bars_and_question() {
        let mut fe = screen(&[]);
        fe.show_stats(&LearningStats {
            total: 4,
            learned: 1,
            ..LearningStats::default()
        })
        .unwrap();
        fe.show_question("WHAT IS HOTKEY FOR \"SAVE\"?").unwrap();

        let text = screen_text(&fe);
        assert!(text.contains("1 action(s) learned"));
        assert!(text.contains("WHAT IS HOTKEY FOR \"SAVE\"?"));
        assert!(text.contains(STATUS_BAR));
    }

    #[test]
    fn typed_keys_are_echoed_after_the_prompt() {
        let mut fe = screen(&[
            (KeyCode::Char('g'), KeyModifiers::NONE),
            (KeyCode::Char('g'), KeyModifiers::NONE),
            (KeyCode::Enter, KeyModifiers::NONE),
        ]);
        fe.show_question("Q").unwrap();
        let input = fe.read_answer().unwrap();
        assert!(matches!(input, AnswerInput::Answer(_)));
        assert!(screen_text(&fe).contains("> gg"));
    }

    #[test]
    fn pause_waits_for_enter() {
        let mut fe = screen(&[
            (KeyCode::Char('x'), KeyModifiers::NONE),
            (KeyCode::Enter, KeyModifiers::NONE),
            (KeyCode::Char('y'), KeyModifiers::NONE),
        ]);
        fe.pause(Pause::AfterAnswer).unwrap();
        assert!(screen_text(&fe).contains("Press ENTER to continue"));
        assert_eq!(fe.read_choice("Show? ").unwrap().as_deref(), Some("y"));
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 1, 80, 10);
        assert_eq!(centered(area, 4), Rect::new(0, 4, 80, 4));
        assert_eq!(centered(area, 40), area);
    }
}
