use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use hotkeys_core::model::Answer;

use super::AnswerInput;

/// Meaning of one key press at the answer prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Step(String),
    Submit,
    Backspace,
    Help,
    Exit,
    Ignore,
}

/// Map a terminal key event to an answer step or a control action.
///
/// Letters keep their case, control chords become `Ctrl+<letter>` and
/// named keys use the names found in definition files (`Esc`, `PgUp`, `F5`).
#[must_use]
pub fn map_key(event: &KeyEvent) -> KeyInput {
    if event.kind == KeyEventKind::Release {
        return KeyInput::Ignore;
    }
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);
    match event.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'h' => KeyInput::Help,
            'e' => KeyInput::Exit,
            'j' | 'm' => KeyInput::Submit,
            lower => KeyInput::Step(format!("Ctrl+{lower}")),
        },
        KeyCode::Char(c) if alt => KeyInput::Step(format!("Alt+{c}")),
        KeyCode::Char(' ') => KeyInput::Step("Space".to_string()),
        KeyCode::Char(c) => KeyInput::Step(c.to_string()),
        KeyCode::Enter => KeyInput::Submit,
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Esc => KeyInput::Step("Esc".to_string()),
        KeyCode::Home => KeyInput::Step("Home".to_string()),
        KeyCode::End => KeyInput::Step("End".to_string()),
        KeyCode::PageUp => KeyInput::Step("PgUp".to_string()),
        KeyCode::PageDown => KeyInput::Step("PgDn".to_string()),
        KeyCode::Tab => KeyInput::Step("Tab".to_string()),
        KeyCode::F(n) => KeyInput::Step(format!("F{n}")),
        _ => KeyInput::Ignore,
    }
}

/// Accumulates keystrokes until the answer is submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyCollector {
    steps: Vec<String>,
}

impl KeyCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key. Returns the finished input once the prompt is done.
    ///
    /// ENTER on an empty prompt is ignored.
    pub fn push(&mut self, input: KeyInput) -> Option<AnswerInput> {
        match input {
            KeyInput::Step(step) => {
                self.steps.push(step);
                None
            }
            KeyInput::Backspace => {
                self.steps.pop();
                None
            }
            KeyInput::Submit if self.steps.is_empty() => None,
            KeyInput::Submit => {
                let steps = std::mem::take(&mut self.steps);
                Some(AnswerInput::Answer(Answer::from_keystrokes(steps)))
            }
            KeyInput::Help => {
                self.steps.clear();
                Some(AnswerInput::Help)
            }
            KeyInput::Exit => {
                self.steps.clear();
                Some(AnswerInput::Exit)
            }
            KeyInput::Ignore => None,
        }
    }

    /// What has been typed so far. Plain keys run together, chords and
    /// named keys are separated by commas.
    #[must_use]
    pub fn display(&self) -> String {
        let mut text = String::new();
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                let prev = &self.steps[i - 1];
                if prev.chars().count() > 1 || step.chars().count() > 1 {
                    text.push(',');
                }
            }
            text.push_str(step);
        }
        text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Source of key events; `None` once input is closed.
pub trait KeySource {
    /// # Errors
    ///
    /// Returns the underlying I/O error if the terminal cannot be read.
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Key events from the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        loop {
            if let Event::Key(key) = event::read()? {
                return Ok(Some(key));
            }
        }
    }
}

impl KeySource for std::vec::IntoIter<KeyEvent> {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.next())
    }
}

/// Read keys from `source` until the prompt is done. `on_change` sees the
/// typed text after every edit.
pub(crate) fn collect_answer<S, F>(source: &mut S, mut on_change: F) -> io::Result<AnswerInput>
where
    S: KeySource + ?Sized,
    F: FnMut(&str) -> io::Result<()>,
{
    let mut collector = KeyCollector::new();
    while let Some(key) = source.next_key()? {
        if let Some(done) = collector.push(map_key(&key)) {
            return Ok(done);
        }
        on_change(&collector.display())?;
    }
    Ok(AnswerInput::Exit)
}

#[cfg(test)]
pub(crate) fn script(keys: &[(KeyCode, KeyModifiers)]) -> std::vec::IntoIter<KeyEvent> {
    keys.iter()
        .map(|(code, mods)| KeyEvent::new(*code, *mods))
        .collect::<Vec<_>>()
        .into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn maps_plain_and_control_keys() {
        assert_eq!(map_key(&key(KeyCode::Char('Z'))), KeyInput::Step("Z".into()));
        assert_eq!(map_key(&ctrl('w')), KeyInput::Step("Ctrl+w".into()));
        assert_eq!(map_key(&ctrl('h')), KeyInput::Help);
        assert_eq!(map_key(&ctrl('e')), KeyInput::Exit);
        assert_eq!(map_key(&key(KeyCode::Enter)), KeyInput::Submit);
        assert_eq!(map_key(&key(KeyCode::F(5))), KeyInput::Step("F5".into()));
        assert_eq!(map_key(&key(KeyCode::PageDown)), KeyInput::Step("PgDn".into()));
        assert_eq!(map_key(&key(KeyCode::Up)), KeyInput::Ignore);
    }

    #[test]
    fn releases_are_ignored() {
        let mut event = key(KeyCode::Char('a'));
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key(&event), KeyInput::Ignore);
    }

    #[test]
    fn collects_sequence_with_backspace() {
        let mut keys = script(&[
            (KeyCode::Char('d'), KeyModifiers::NONE),
            (KeyCode::Char('x'), KeyModifiers::NONE),
            (KeyCode::Backspace, KeyModifiers::NONE),
            (KeyCode::Char('d'), KeyModifiers::NONE),
            (KeyCode::Enter, KeyModifiers::NONE),
        ]);
        let mut seen = Vec::new();
        let input = collect_answer(&mut keys, |text| {
            seen.push(text.to_string());
            Ok(())
        })
        .unwrap();
        assert_eq!(
            input,
            AnswerInput::Answer(Answer::new(vec!["d".into(), "d".into()]))
        );
        assert_eq!(seen, vec!["d", "dx", "d", "dd"]);
    }

    #[test]
    fn colon_prefix_folds_into_command() {
        let mut collector = KeyCollector::new();
        for c in [':', 'w', 'q'] {
            assert_eq!(collector.push(KeyInput::Step(c.to_string())), None);
        }
        assert_eq!(
            collector.push(KeyInput::Submit),
            Some(AnswerInput::Answer(Answer::new(vec![":wq".into()])))
        );
    }

    #[test]
    fn chords_are_comma_separated_on_display() {
        let mut collector = KeyCollector::new();
        collector.push(KeyInput::Step("Ctrl+x".into()));
        collector.push(KeyInput::Step("Ctrl+s".into()));
        collector.push(KeyInput::Step("a".into()));
        assert_eq!(collector.display(), "Ctrl+x,Ctrl+s,a");
    }

    #[test]
    fn empty_submit_is_ignored_and_closed_input_exits() {
        let mut keys = script(&[(KeyCode::Enter, KeyModifiers::NONE)]);
        let input = collect_answer(&mut keys, |_| Ok(())).unwrap();
        assert_eq!(input, AnswerInput::Exit);
    }

    #[test]
    fn help_chord_ends_the_prompt() {
        let mut keys = script(&[
            (KeyCode::Char('a'), KeyModifiers::NONE),
            (KeyCode::Char('h'), KeyModifiers::CONTROL),
        ]);
        assert_eq!(collect_answer(&mut keys, |_| Ok(())).unwrap(), AnswerInput::Help);
    }
}
