use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{ActionKey, GuessOutcome, LearningStats, ProgressRecord};

/// How many extra draws `next_quiz_key` spends trying to avoid a repeat.
const REPEAT_RETRIES: u32 = 5;

//
// ─── PROGRESS STORE ────────────────────────────────────────────────────────────
//

/// Mapping from action key to its learning state, as persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressStore {
    records: BTreeMap<ActionKey, ProgressRecord>,
}

impl ProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ProgressRecord> {
        self.records.get(key)
    }

    pub fn insert(&mut self, key: ActionKey, record: ProgressRecord) -> Option<ProgressRecord> {
        self.records.insert(key, record)
    }

    pub fn remove(&mut self, key: &str) -> Option<ProgressRecord> {
        self.records.remove(key)
    }

    /// Record for `key`, created empty if missing.
    pub fn entry(&mut self, key: &ActionKey) -> &mut ProgressRecord {
        self.records.entry(key.clone()).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActionKey, &ProgressRecord)> {
        self.records.iter()
    }
}

impl FromIterator<(ActionKey, ProgressRecord)> for ProgressStore {
    fn from_iter<I: IntoIterator<Item = (ActionKey, ProgressRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

/// Owns the progress store and applies the learning rules to it.
///
/// Selection, scoring and the aggregate counters live here; persistence is
/// the caller's job (see the storage crate).
///
/// ```
/// # use hotkeys_core::model::ActionKey;
/// # use hotkeys_core::tracker::{ProgressStore, ProgressTracker};
/// let mut tracker = ProgressTracker::new(ProgressStore::new()).with_seed(7);
/// tracker.reconcile([ActionKey::new("save")]);
///
/// let key = tracker.next_quiz_key().unwrap();
/// for _ in 0..3 {
///     tracker.score(&key, true);
/// }
/// assert!(tracker.all_learned());
/// assert_eq!(tracker.next_quiz_key(), None);
/// ```
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    store: ProgressStore,
    catalog_keys: Option<BTreeSet<ActionKey>>,
    previous: Option<ActionKey>,
    rng: StdRng,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(store: ProgressStore) -> Self {
        Self {
            store,
            catalog_keys: None,
            previous: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a seeded generator (deterministic selection in tests).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> ProgressStore {
        self.store
    }

    #[must_use]
    pub fn record(&self, key: &str) -> Option<&ProgressRecord> {
        self.store.get(key)
    }

    #[must_use]
    pub fn is_learned(&self, key: &str) -> bool {
        self.store.get(key).is_some_and(|record| record.learned)
    }

    /// Adds an empty record for every catalog key without one.
    ///
    /// Existing records, including ones for keys the catalog no longer has,
    /// are left untouched. The key set is remembered so aggregates skip
    /// stale records.
    pub fn reconcile<I>(&mut self, catalog_keys: I)
    where
        I: IntoIterator<Item = ActionKey>,
    {
        let keys: BTreeSet<ActionKey> = catalog_keys.into_iter().collect();
        for key in &keys {
            if !self.store.contains(key.as_str()) {
                self.store.insert(key.clone(), ProgressRecord::default());
            }
        }
        self.catalog_keys = Some(keys);
    }

    /// Picks a random action that is not learned yet.
    ///
    /// The previous pick is redrawn up to `REPEAT_RETRIES` times when there
    /// is another candidate, so repeats are unlikely but not impossible.
    ///
    /// Once reconciled, `None` means every catalog key is learned. Stale
    /// records can still be drawn while catalog work remains; the caller
    /// drops them after the catalog lookup fails.
    pub fn next_quiz_key(&mut self) -> Option<ActionKey> {
        if self.catalog_keys.is_some() && self.counted().all(|record| record.learned) {
            return None;
        }
        let candidates: Vec<&ActionKey> = self
            .store
            .iter()
            .filter(|(_, record)| !record.learned)
            .map(|(key, _)| key)
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let mut retries = 0;
        let picked = loop {
            let pick = candidates[self.rng.random_range(0..candidates.len())];
            let is_repeat = self.previous.as_ref() == Some(pick);
            if is_repeat && candidates.len() > 1 && retries < REPEAT_RETRIES {
                retries += 1;
                continue;
            }
            break pick.clone();
        };

        self.previous = Some(picked.clone());
        Some(picked)
    }

    /// Scores one guess, creating the record if it does not exist yet.
    pub fn score(&mut self, key: &ActionKey, is_correct: bool) -> GuessOutcome {
        self.store.entry(key).score(is_correct)
    }

    pub fn mark_learned(&mut self, key: &ActionKey) {
        self.store.entry(key).mark_learned();
    }

    /// Drops the record of a key the catalog could not resolve.
    pub fn remove_record(&mut self, key: &str) -> Option<ProgressRecord> {
        if self.previous.as_ref().is_some_and(|prev| prev.as_str() == key) {
            self.previous = None;
        }
        self.store.remove(key)
    }

    fn counted(&self) -> impl Iterator<Item = &ProgressRecord> {
        self.store
            .iter()
            .filter(|(key, _)| {
                self.catalog_keys
                    .as_ref()
                    .is_none_or(|keys| keys.contains(*key))
            })
            .map(|(_, record)| record)
    }

    /// True if there is something to learn and all of it is learned.
    #[must_use]
    pub fn all_learned(&self) -> bool {
        let mut any = false;
        for record in self.counted() {
            if !record.learned {
                return false;
            }
            any = true;
        }
        any
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.counted().count()
    }

    #[must_use]
    pub fn learned_count(&self) -> usize {
        self.counted().filter(|record| record.learned).count()
    }

    #[must_use]
    pub fn in_process_count(&self) -> usize {
        self.counted().filter(|record| record.in_process()).count()
    }

    #[must_use]
    pub fn to_learn_count(&self) -> usize {
        self.total_count() - self.learned_count()
    }

    #[must_use]
    pub fn total_guesses(&self) -> u64 {
        self.counted().map(|record| u64::from(record.guess_count)).sum()
    }

    #[must_use]
    pub fn total_errors(&self) -> u64 {
        self.counted().map(|record| u64::from(record.error_count)).sum()
    }

    #[must_use]
    pub fn stats(&self) -> LearningStats {
        LearningStats {
            total: self.total_count(),
            learned: self.learned_count(),
            in_process: self.in_process_count(),
            guesses: self.total_guesses(),
            errors: self.total_errors(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
