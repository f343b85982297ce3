use hotkeys_core::model::SessionSummary;
use services::{SessionLoopService, TutorSession};
use tracing::debug;

use crate::error::FrontendError;
use crate::frontend::{AnswerInput, Frontend, Pause, Tone};

pub const SUCCESS_MESSAGE: &str = "All hotkeys are learned, nothing to do";
pub const CORRECT_MESSAGE: &str = "Correct!";
pub const WRONG_MESSAGE: &str = "Wrong!";
pub const SHOW_ANSWER_PROMPT: &str = "Want to see correct answer? [y/n]: ";
pub const YES_NO_REPROMPT: &str = "You should type \"y\" or \"n\"";

/// Ask whether to show the correct answer. Closed input counts as "no".
fn wants_correct_answer<F: Frontend + ?Sized>(frontend: &mut F) -> Result<bool, FrontendError> {
    loop {
        let Some(reply) = frontend.read_choice(SHOW_ANSWER_PROMPT)? else {
            return Ok(false);
        };
        match reply.trim() {
            "y" | "Y" => return Ok(true),
            "n" | "N" => return Ok(false),
            _ => frontend.show_message(YES_NO_REPROMPT, Tone::Error)?,
        }
    }
}

/// Drive a session until everything is learned or the learner exits.
///
/// Progress is saved after every scored answer; a failed save ends the run
/// with the error.
///
/// # Errors
///
/// Returns `FrontendError::Terminal` for I/O failures and
/// `FrontendError::Tutor` for storage failures.
pub async fn run_tutor<F: Frontend + ?Sized>(
    frontend: &mut F,
    service: &SessionLoopService,
    session: &mut TutorSession,
) -> Result<SessionSummary, FrontendError> {
    frontend.show_stats(&session.stats())?;

    loop {
        let Some(question) = service.next_question(session)? else {
            frontend.show_message(SUCCESS_MESSAGE, Tone::Success)?;
            frontend.pause(Pause::BeforeExit)?;
            break;
        };
        let notes = frontend.input_notes(&question);
        frontend.show_question(&question.render(&notes))?;

        match frontend.read_answer()? {
            AnswerInput::Exit => {
                debug!(key = %question.key, "learner exited");
                session.skip_pending();
                break;
            }
            AnswerInput::Help => {
                let help = service.help_for_pending(session)?;
                session.skip_pending();
                frontend.show_message(&help, Tone::Regular)?;
                frontend.pause(Pause::AfterHelp)?;
            }
            AnswerInput::Answer(answer) => {
                let outcome = service.answer(session, &answer).await?;
                if outcome.is_correct() {
                    frontend.show_message(CORRECT_MESSAGE, Tone::Success)?;
                } else {
                    frontend.show_message(WRONG_MESSAGE, Tone::Error)?;
                    if wants_correct_answer(frontend)? {
                        frontend.show_message(&outcome.help, Tone::Regular)?;
                    }
                }
                frontend.show_stats(&outcome.stats)?;
                frontend.pause(Pause::AfterAnswer)?;
            }
        }
    }

    Ok(service.finish(session)?)
}
