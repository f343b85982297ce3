use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::model::action::{Action, AnswerKind};
use crate::model::answer::AnswerToken;
use crate::model::ids::ActionKey;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("action `{key}` not found in catalog")]
    NotFound { key: ActionKey },
}

/// Read-only set of learnable actions for one target application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    app_name: String,
    actions: BTreeMap<ActionKey, Action>,
}

impl Catalog {
    #[must_use]
    pub fn new(app_name: impl Into<String>, actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            app_name: app_name.into(),
            actions: actions
                .into_iter()
                .map(|action| (action.key().clone(), action))
                .collect(),
        }
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.actions.contains_key(key)
    }

    /// All action keys.
    #[must_use]
    pub fn keys(&self) -> BTreeSet<ActionKey> {
        self.actions.keys().cloned().collect()
    }

    /// Looks up an action.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the key is not in the catalog.
    pub fn get(&self, key: &str) -> Result<&Action, CatalogError> {
        self.actions.get(key).ok_or_else(|| CatalogError::NotFound {
            key: ActionKey::new(key),
        })
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the key is not in the catalog.
    pub fn description(&self, key: &str) -> Result<&str, CatalogError> {
        self.get(key).map(Action::description)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the key is not in the catalog.
    pub fn answer_kind(&self, key: &str) -> Result<AnswerKind, CatalogError> {
        self.get(key).map(Action::answer_kind)
    }

    /// Labels of every declared kind, e.g. `["hotkey", "command"]`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the key is not in the catalog.
    pub fn kind_labels(&self, key: &str) -> Result<Vec<&'static str>, CatalogError> {
        self.get(key)
            .map(|action| action.kinds().iter().map(|kind| kind.label()).collect())
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the key is not in the catalog.
    pub fn accepted_answers(&self, key: &str) -> Result<&[AnswerToken], CatalogError> {
        self.get(key).map(Action::accepted_answers)
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }
}
