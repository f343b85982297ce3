use std::collections::BTreeMap;
use std::fmt;

use hotkeys_core::model::{
    Action, ActionKey, AnswerKind, AnswerToken, Catalog, LEARN_THRESHOLD, ProgressRecord,
};
use hotkeys_core::tracker::ProgressStore;
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

fn malformed<E: fmt::Display>(e: E) -> StorageError {
    StorageError::MalformedCatalog(e.to_string())
}

//
// ─── CATALOG DOCUMENT ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogDoc {
    app: String,
    actions: BTreeMap<String, ActionDoc>,
}

#[derive(Debug, Deserialize)]
struct ActionDoc {
    description: String,
    #[serde(default, rename = "type")]
    kind: Option<KindDoc>,
    hotkeys: Vec<HotkeyDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KindDoc {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HotkeyDoc {
    Steps(Vec<ScalarDoc>),
    Raw(ScalarDoc),
}

/// YAML reads bare `0` or `5` as numbers; keys are text either way.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScalarDoc {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ScalarDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarDoc::Text(s) => f.write_str(s),
            ScalarDoc::Int(i) => write!(f, "{i}"),
            ScalarDoc::Float(x) => write!(f, "{x}"),
            ScalarDoc::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl HotkeyDoc {
    fn into_token(self) -> AnswerToken {
        match self {
            HotkeyDoc::Raw(raw) => AnswerToken::from_raw(&raw.to_string()),
            HotkeyDoc::Steps(steps) => {
                AnswerToken::from_steps(steps.iter().map(ToString::to_string).collect())
            }
        }
    }
}

impl KindDoc {
    fn into_kinds(self) -> Result<Vec<AnswerKind>, StorageError> {
        let names = match self {
            KindDoc::One(name) => vec![name],
            KindDoc::Many(names) => names,
        };
        names
            .iter()
            .map(|name| name.parse::<AnswerKind>().map_err(malformed))
            .collect()
    }
}

pub(crate) fn parse_catalog(raw: &str) -> Result<Catalog, StorageError> {
    let doc: CatalogDoc = serde_yaml::from_str(raw).map_err(malformed)?;
    doc.into_catalog()
}

impl CatalogDoc {
    fn into_catalog(self) -> Result<Catalog, StorageError> {
        let mut actions = Vec::with_capacity(self.actions.len());
        for (key, doc) in self.actions {
            let kinds = match doc.kind {
                Some(kind) => kind.into_kinds()?,
                None => Vec::new(),
            };
            let accepted = doc.hotkeys.into_iter().map(HotkeyDoc::into_token).collect();
            let action = Action::new(ActionKey::new(key), doc.description, kinds, accepted)
                .map_err(malformed)?;
            actions.push(action);
        }
        Ok(Catalog::new(self.app, actions))
    }
}

//
// ─── PROGRESS DOCUMENT ─────────────────────────────────────────────────────────
//

/// On-disk shape of the progress store. Every record field is optional on read.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct ProgressDoc {
    #[serde(default)]
    actions: Option<BTreeMap<String, Option<RecordDoc>>>,
}

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
struct RecordDoc {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    guesses: u32,
    #[serde(default)]
    correct_guesses: u32,
    #[serde(default)]
    error_guesses: u32,
}

impl From<RecordDoc> for ProgressRecord {
    fn from(doc: RecordDoc) -> Self {
        Self {
            guess_count: doc.guesses,
            correct_streak: doc.correct_guesses.min(LEARN_THRESHOLD),
            error_count: doc.error_guesses,
            learned: doc.success,
        }
    }
}

impl From<&ProgressRecord> for RecordDoc {
    fn from(record: &ProgressRecord) -> Self {
        Self {
            success: record.learned,
            guesses: record.guess_count,
            correct_guesses: record.correct_streak,
            error_guesses: record.error_count,
        }
    }
}

pub(crate) fn parse_progress(raw: &str) -> Result<ProgressStore, StorageError> {
    if raw.trim().is_empty() {
        return Ok(ProgressStore::new());
    }
    let doc: Option<ProgressDoc> =
        serde_yaml::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    Ok(doc.map(ProgressDoc::into_store).unwrap_or_default())
}

pub(crate) fn render_progress(store: &ProgressStore) -> Result<String, StorageError> {
    let actions = store
        .iter()
        .map(|(key, record)| (key.to_string(), Some(RecordDoc::from(record))))
        .collect();
    let doc = ProgressDoc {
        actions: Some(actions),
    };
    serde_yaml::to_string(&doc).map_err(|e| StorageError::Serialization(e.to_string()))
}

impl ProgressDoc {
    fn into_store(self) -> ProgressStore {
        self.actions
            .unwrap_or_default()
            .into_iter()
            .map(|(key, record)| (ActionKey::new(key), record.unwrap_or_default().into()))
            .collect()
    }
}
