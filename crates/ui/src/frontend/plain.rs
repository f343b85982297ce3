use std::io::{BufRead, Write};

use hotkeys_core::model::{Answer, LearningStats};
use services::QuizQuestion;

use super::{AnswerInput, Frontend, Pause, Tone};
use crate::error::FrontendError;

const HELP_COMMAND: &str = "\\h";
const EXIT_COMMAND: &str = "\\e";

const SEQUENCE_NOTE: &str = "If you need to type several keys combinations one by one, type them with comma separator like \"a,b\"";
const CTRL_NOTE: &str = "If you need to use Ctrl or other special key in answer, type it's name plus regular key like \"Ctrl+w\"";
const TYPING_NOTE: &str = "Type keys combination or \"\\h\" for help or \"\\e\" to exit and press ENTER";

/// Line-oriented front end: answers are typed as text and submitted with ENTER.
pub struct PlainFrontend<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PlainFrontend<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<Option<String>, FrontendError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<(), FrontendError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Frontend for PlainFrontend<R, W> {
    fn input_notes(&self, question: &QuizQuestion) -> Vec<String> {
        let mut notes = Vec::new();
        if question.has_sequence_answer {
            notes.push(SEQUENCE_NOTE.to_string());
        }
        if question.uses_ctrl {
            notes.push(CTRL_NOTE.to_string());
        }
        notes.push(TYPING_NOTE.to_string());
        notes
    }

    fn show_stats(&mut self, stats: &LearningStats) -> Result<(), FrontendError> {
        writeln!(self.output, "{stats}")?;
        Ok(())
    }

    fn show_question(&mut self, text: &str) -> Result<(), FrontendError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn show_message(&mut self, text: &str, tone: Tone) -> Result<(), FrontendError> {
        if tone == Tone::Regular {
            writeln!(self.output)?;
        }
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn read_answer(&mut self) -> Result<AnswerInput, FrontendError> {
        loop {
            self.prompt("> ")?;
            let Some(line) = self.read_line()? else {
                return Ok(AnswerInput::Exit);
            };
            match line.trim() {
                HELP_COMMAND => return Ok(AnswerInput::Help),
                EXIT_COMMAND => return Ok(AnswerInput::Exit),
                _ => {}
            }
            // Blank lines (or only separators) ask again.
            let answer = Answer::parse_typed(&line);
            if !answer.is_empty() {
                return Ok(AnswerInput::Answer(answer));
            }
        }
    }

    fn read_choice(&mut self, prompt: &str) -> Result<Option<String>, FrontendError> {
        self.prompt(prompt)?;
        self.read_line()
    }

    fn pause(&mut self, at: Pause) -> Result<(), FrontendError> {
        match at {
            Pause::AfterHelp => {
                self.prompt("Press ENTER to continue")?;
                self.read_line()?;
            }
            Pause::AfterAnswer => writeln!(self.output)?,
            Pause::BeforeExit => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotkeys_core::model::{Action, ActionKey, AnswerToken};
    use services::TutorService;
    use hotkeys_core::model::Catalog;

    fn frontend(input: &str) -> PlainFrontend<&[u8], Vec<u8>> {
        PlainFrontend::new(input.as_bytes(), Vec::new())
    }

    fn question(answers: &[&str]) -> QuizQuestion {
        let action = Action::new(
            ActionKey::new("a"),
            "Something",
            Vec::new(),
            answers.iter().map(|a| AnswerToken::from_raw(a)).collect(),
        )
        .unwrap();
        TutorService::new(Catalog::new("App", [action]))
            .question_for(&ActionKey::new("a"))
            .unwrap()
    }

    #[test]
    fn reads_commands_and_answers() {
        let mut fe = frontend("\\h\n\\e\nCtrl+x, Ctrl+s\n");
        assert_eq!(fe.read_answer().unwrap(), AnswerInput::Help);
        assert_eq!(fe.read_answer().unwrap(), AnswerInput::Exit);
        assert_eq!(
            fe.read_answer().unwrap(),
            AnswerInput::Answer(Answer::new(vec!["Ctrl+x".into(), "Ctrl+s".into()]))
        );
        assert_eq!(fe.read_answer().unwrap(), AnswerInput::Exit);
    }

    #[test]
    fn blank_lines_are_asked_again() {
        let mut fe = frontend("\n , \n   \ndd\n");
        assert_eq!(
            fe.read_answer().unwrap(),
            AnswerInput::Answer(Answer::new(vec!["d".into(), "d".into()]))
        );
        let out = String::from_utf8(fe.into_output()).unwrap();
        assert_eq!(out, "> > > > ");
    }

    #[test]
    fn blank_line_before_end_of_input_exits() {
        let mut fe = frontend("\n");
        assert_eq!(fe.read_answer().unwrap(), AnswerInput::Exit);
    }

    #[test]
    fn notes_follow_the_accepted_answers() {
        let fe = frontend("");
        assert_eq!(fe.input_notes(&question(&["x"])), vec![TYPING_NOTE.to_string()]);
        assert_eq!(
            fe.input_notes(&question(&["dd", "Ctrl+w"])),
            vec![
                SEQUENCE_NOTE.to_string(),
                CTRL_NOTE.to_string(),
                TYPING_NOTE.to_string()
            ]
        );
    }

    #[test]
    fn choice_prompt_is_written_without_newline() {
        let mut fe = frontend("y\r\n");
        assert_eq!(fe.read_choice("Sure? ").unwrap().as_deref(), Some("y"));
        assert_eq!(fe.read_choice("Sure? ").unwrap(), None);
        let out = String::from_utf8(fe.into_output()).unwrap();
        assert_eq!(out, "Sure? Sure? ");
    }
}
