use crate::core::data::{Prompt, PromptCollection, PromptInput, PromptPatch};
use crate::core::store::MemoryStore;
use crate::core::traits::PromptStore;
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Prompt store persisted as a TOML snapshot.
///
/// Reads are served from memory. After every successful mutation the whole
/// collection is written to a temp file next to the target and renamed over
/// it, one writer at a time.
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let collection = load_prompts(&path).await?;
        info!(
            "Loaded {} prompts from {}",
            collection.prompts.len(),
            path.display()
        );

        Ok(Self {
            path,
            inner: MemoryStore::from_collection(collection),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save_prompts(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        // Snapshot under the lock so the last writer always holds the newest state.
        let collection = self.inner.snapshot().await;

        let content = toml::to_string_pretty(&collection)
            .map_err(|e| AppError::storage(format!("Failed to serialize prompt collection: {}", e)))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::storage(format!("Failed to create prompt directory {}: {}", parent.display(), e))
            })?;
        }

        let tmp = self.path.with_extension("toml.tmp");
        tokio::fs::write(&tmp, content).await.map_err(|e| {
            AppError::storage(format!("Failed to write prompt file {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::storage(format!("Failed to replace prompt file {}: {}", self.path.display(), e))
        })?;

        debug!(count = collection.prompts.len(), "saved prompt file");
        Ok(())
    }
}

async fn load_prompts(path: &Path) -> AppResult<PromptCollection> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(PromptCollection::default()),
        Err(e) => {
            return Err(AppError::storage(format!(
                "Failed to read prompt file {}: {}",
                path.display(),
                e
            )));
        }
    };

    // Handle empty files
    if content.trim().is_empty() {
        return Ok(PromptCollection::default());
    }

    toml::from_str(&content)
        .map_err(|e| AppError::storage(format!("Failed to parse prompt file {}: {}", path.display(), e)))
}

#[async_trait]
impl PromptStore for FileStore {
    async fn create(&self, input: PromptInput) -> AppResult<Prompt> {
        let prompt = self.inner.create(input).await?;
        self.save_prompts().await?;
        Ok(prompt)
    }

    async fn get(&self, id: &str) -> AppResult<Prompt> {
        self.inner.get(id).await
    }

    async fn list(&self) -> AppResult<Vec<Prompt>> {
        self.inner.list().await
    }

    async fn replace(&self, id: &str, input: PromptInput) -> AppResult<Prompt> {
        let prompt = self.inner.replace(id, input).await?;
        self.save_prompts().await?;
        Ok(prompt)
    }

    async fn patch(&self, id: &str, patch: PromptPatch) -> AppResult<Prompt> {
        let prompt = self.inner.patch(id, patch).await?;
        self.save_prompts().await?;
        Ok(prompt)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.inner.delete(id).await?;
        self.save_prompts().await
    }

    async fn mark_used(&self, id: &str) -> AppResult<Prompt> {
        let prompt = self.inner.mark_used(id).await?;
        self.save_prompts().await?;
        Ok(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::Category;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("prompts.toml")).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prompts.toml");
        std::fs::write(&path, "  \n").unwrap();

        let store = FileStore::open(&path).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mutations_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prompts.toml");

        let (kept, used) = {
            let store = FileStore::open(&path).await.unwrap();
            let kept = store
                .create(PromptInput::new("Keep", "me").with_category("Study").with_tags(["a"]))
                .await
                .unwrap();
            let gone = store.create(PromptInput::new("Gone", "soon")).await.unwrap();
            store.mark_used(&kept.id).await.unwrap();
            let used = store.patch(&kept.id, PromptPatch::favorite(true)).await.unwrap();
            store.delete(&gone.id).await.unwrap();
            (kept, used)
        };

        let reopened = FileStore::open(&path).await.unwrap();
        let prompts = reopened.list().await.unwrap();
        assert_eq!(prompts.len(), 1);

        let prompt = &prompts[0];
        assert_eq!(prompt.id, kept.id);
        assert_eq!(prompt.category, Category::Study);
        assert_eq!(prompt.tags, vec!["a"]);
        assert!(prompt.is_favorite);
        assert_eq!(prompt.use_count, 1);
        assert_eq!(prompt.last_used, used.last_used);
    }

    #[tokio::test]
    async fn test_failed_validation_does_not_touch_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prompts.toml");
        let store = FileStore::open(&path).await.unwrap();

        assert!(store.create(PromptInput::new(" ", "x")).await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prompts.toml");
        std::fs::write(&path, "prompts = 12").unwrap();

        let result = FileStore::open(&path).await;
        assert!(matches!(result, Err(AppError::StorageUnavailable(_))));
    }
}
