use async_trait::async_trait;
use hotkeys_core::model::Catalog;
use hotkeys_core::tracker::ProgressStore;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    MalformedCatalog(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("connection error: {0}")]
    Connection(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Source of the read-only action catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load and validate the catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::MalformedCatalog` for structurally invalid data,
    /// or `StorageError::Io` if the source cannot be read.
    async fn load_catalog(&self) -> Result<Catalog, StorageError>;
}

/// Repository contract for the persisted progress store.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the whole store. A store that was never saved loads empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if existing data cannot be read or parsed.
    async fn load_progress(&self) -> Result<ProgressStore, StorageError>;

    /// Overwrite the persisted store with `store`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn save_progress(&self, store: &ProgressStore) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    catalog: Arc<Mutex<Option<Catalog>>>,
    progress: Arc<Mutex<ProgressStore>>,
    saves: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let repo = Self::new();
        if let Ok(mut guard) = repo.catalog.lock() {
            *guard = Some(catalog);
        }
        repo
    }

    /// Replace the stored progress (simulates a file left by an earlier session).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn seed_progress(&self, store: ProgressStore) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = store;
        Ok(())
    }

    /// Number of successful `save_progress` calls.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make every following save fail, as an unwritable medium would.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogSource for InMemoryRepository {
    async fn load_catalog(&self) -> Result<Catalog, StorageError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clone().ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_progress(&self) -> Result<ProgressStore, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_progress(&self, store: &ProgressStore) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::io(
                "memory",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = store.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Aggregates the catalog source and progress repository behind trait objects.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<dyn CatalogSource>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(catalog: Catalog) -> Self {
        let repo = InMemoryRepository::with_catalog(catalog);
        let source: Arc<dyn CatalogSource> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self {
            catalog: source,
            progress,
        }
    }
}
