use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use hotkeys_core::model::Catalog;
use hotkeys_core::tracker::ProgressStore;
use tracing::debug;

use crate::repository::{CatalogSource, ProgressRepository, Storage, StorageError};

mod mapping;

/// Action definitions read from a YAML file.
#[derive(Debug, Clone)]
pub struct YamlCatalogFile {
    path: PathBuf,
}

impl YamlCatalogFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for YamlCatalogFile {
    async fn load_catalog(&self) -> Result<Catalog, StorageError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StorageError::io(&self.path, e))?;
        let catalog = mapping::parse_catalog(&raw)?;
        debug!(
            path = %self.path.display(),
            app = catalog.app_name(),
            actions = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}

/// Progress store persisted as a YAML file.
///
/// Saves write a sibling temp file and rename it over the target, so an
/// interrupted save leaves the previous contents in place.
#[derive(Debug, Clone)]
pub struct YamlProgressFile {
    path: PathBuf,
}

impl YamlProgressFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ProgressRepository for YamlProgressFile {
    async fn load_progress(&self) -> Result<ProgressStore, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no progress file yet, starting empty");
                return Ok(ProgressStore::new());
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        let store = mapping::parse_progress(&raw)?;
        debug!(path = %self.path.display(), records = store.len(), "progress loaded");
        Ok(store)
    }

    async fn save_progress(&self, store: &ProgressStore) -> Result<(), StorageError> {
        let rendered = mapping::render_progress(store)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, rendered)
            .await
            .map_err(|e| StorageError::io(&temp, e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StorageError::io(&self.path, e))?;
        debug!(path = %self.path.display(), records = store.len(), "progress saved");
        Ok(())
    }
}

impl Storage {
    /// Build a `Storage` backed by a YAML definition file and a YAML progress file.
    #[must_use]
    pub fn yaml(definitions: impl Into<PathBuf>, progress: impl Into<PathBuf>) -> Self {
        let catalog: Arc<dyn CatalogSource> = Arc::new(YamlCatalogFile::new(definitions));
        let progress: Arc<dyn ProgressRepository> = Arc::new(YamlProgressFile::new(progress));
        Self { catalog, progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repositories_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<YamlCatalogFile>();
        assert_send_sync::<YamlProgressFile>();
    }

    #[test]
    fn temp_file_sits_next_to_target() {
        let repo = YamlProgressFile::new("/data/lrnres.yaml");
        assert_eq!(repo.temp_path(), PathBuf::from("/data/lrnres.yaml.tmp"));
    }
}
