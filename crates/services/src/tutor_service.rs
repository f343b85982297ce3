use hotkeys_core::model::{Action, ActionKey, Answer, AnswerToken, Catalog, CatalogError};

use crate::sessions::QuizQuestion;

//
// ─── TUTOR SERVICE ─────────────────────────────────────────────────────────────
//

/// Read-only questions over the catalog: building prompts, checking answers
/// and formatting the accepted hotkeys.
#[derive(Debug, Clone)]
pub struct TutorService {
    catalog: Catalog,
}

impl TutorService {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Build the question asked for `key`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog has no such action.
    pub fn question_for(&self, key: &ActionKey) -> Result<QuizQuestion, CatalogError> {
        let action = self.catalog.get(key.as_str())?;
        Ok(QuizQuestion::from_action(action))
    }

    /// Whether `answer` matches one of the hotkeys accepted for `key`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog has no such action.
    pub fn check_answer(&self, key: &ActionKey, answer: &Answer) -> Result<bool, CatalogError> {
        let accepted = self.catalog.accepted_answers(key.as_str())?;
        Ok(answer.matches(accepted))
    }

    /// Accepted hotkeys for `key`, each quoted, joined with `or`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog has no such action.
    pub fn correct_answers(&self, key: &ActionKey) -> Result<String, CatalogError> {
        let action = self.catalog.get(key.as_str())?;
        Ok(format_accepted(action.accepted_answers()))
    }

    /// Help line naming the action and every accepted hotkey.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog has no such action.
    pub fn help_text(&self, key: &ActionKey) -> Result<String, CatalogError> {
        let action = self.catalog.get(key.as_str())?;
        Ok(help_line(action))
    }
}

fn format_accepted(accepted: &[AnswerToken]) -> String {
    accepted
        .iter()
        .map(|token| format!("\"{token}\""))
        .collect::<Vec<_>>()
        .join(" or ")
}

fn help_line(action: &Action) -> String {
    format!(
        "Key combination(s) for \"{}\": {}",
        action.description(),
        format_accepted(action.accepted_answers())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotkeys_core::model::AnswerKind;

    fn service() -> TutorService {
        let save = Action::new(
            ActionKey::new("save"),
            "Save file",
            vec![AnswerKind::SingleKeyCombo, AnswerKind::Command],
            vec![
                AnswerToken::from_steps(vec!["Ctrl+x".into(), "Ctrl+s".into()]),
                AnswerToken::from_raw(":w"),
            ],
        )
        .unwrap();
        let delete_line = Action::new(
            ActionKey::new("delete_line"),
            "Delete line",
            Vec::new(),
            vec![AnswerToken::from_raw("dd")],
        )
        .unwrap();
        TutorService::new(Catalog::new("Editor", [save, delete_line]))
    }

    #[test]
    fn checks_single_and_sequence_answers() {
        let svc = service();
        let save = ActionKey::new("save");
        assert!(svc.check_answer(&save, &Answer::parse_typed(":w")).unwrap());
        assert!(
            svc.check_answer(&save, &Answer::parse_typed("Ctrl+x,Ctrl+s"))
                .unwrap()
        );
        assert!(!svc.check_answer(&save, &Answer::parse_typed("Ctrl+s")).unwrap());

        let dd = ActionKey::new("delete_line");
        assert!(svc.check_answer(&dd, &Answer::parse_typed("d,d")).unwrap());
        assert!(svc.check_answer(&dd, &Answer::parse_typed("dd")).unwrap());
    }

    #[test]
    fn formats_help_with_every_accepted_hotkey() {
        let svc = service();
        assert_eq!(
            svc.help_text(&ActionKey::new("save")).unwrap(),
            "Key combination(s) for \"Save file\": \"Ctrl+x,Ctrl+s\" or \":w\""
        );
        assert_eq!(
            svc.correct_answers(&ActionKey::new("delete_line")).unwrap(),
            "\"d,d\""
        );
    }

    #[test]
    fn unknown_key_is_not_found() {
        let svc = service();
        let ghost = ActionKey::new("ghost");
        assert!(matches!(
            svc.question_for(&ghost),
            Err(CatalogError::NotFound { .. })
        ));
        assert!(svc.check_answer(&ghost, &Answer::parse_typed("x")).is_err());
    }
}
