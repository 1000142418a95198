//! In-memory prompt store

use crate::core::data::{Prompt, PromptCollection, PromptInput, PromptPatch};
use crate::core::traits::PromptStore;
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    prompt: Prompt,
}

#[derive(Debug, Default)]
struct Records {
    next_seq: u64,
    by_id: HashMap<String, Entry>,
}

impl Records {
    fn insert(&mut self, prompt: Prompt) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_id.insert(prompt.id.clone(), Entry { seq, prompt });
    }

    fn get_mut(&mut self, id: &str) -> AppResult<&mut Prompt> {
        self.by_id
            .get_mut(id)
            .map(|entry| &mut entry.prompt)
            .ok_or_else(|| AppError::not_found(id))
    }

    fn ordered(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.by_id.values().collect();
        entries.sort_by_key(|e| e.seq);
        entries
    }
}

/// Records held in a map behind a single async lock. Mutations hold the
/// write lock for their whole read-modify-write, so concurrent `mark_used`
/// calls never lose an increment.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from an existing collection, keeping its order as the
    /// insertion order.
    pub fn from_collection(collection: PromptCollection) -> Self {
        let mut records = Records::default();
        for prompt in collection.prompts {
            records.insert(prompt);
        }
        Self {
            records: RwLock::new(records),
        }
    }

    /// Prompts in insertion order, the shape persisted by the file store
    pub async fn snapshot(&self) -> PromptCollection {
        let records = self.records.read().await;
        PromptCollection::new(records.ordered().into_iter().map(|e| e.prompt.clone()).collect())
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PromptStore for MemoryStore {
    async fn create(&self, input: PromptInput) -> AppResult<Prompt> {
        let fields = input.validate()?;
        let prompt = Prompt::new(fields, Utc::now());
        self.records.write().await.insert(prompt.clone());
        debug!(id = %prompt.id, "created prompt");
        Ok(prompt)
    }

    async fn get(&self, id: &str) -> AppResult<Prompt> {
        self.records
            .read()
            .await
            .by_id
            .get(id)
            .map(|e| e.prompt.clone())
            .ok_or_else(|| AppError::not_found(id))
    }

    async fn list(&self) -> AppResult<Vec<Prompt>> {
        let records = self.records.read().await;
        let mut entries = records.ordered();
        // Newest first; equal timestamps fall back to the later insert.
        entries.sort_by(|a, b| {
            b.prompt
                .created_at
                .cmp(&a.prompt.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(entries.into_iter().map(|e| e.prompt.clone()).collect())
    }

    async fn replace(&self, id: &str, input: PromptInput) -> AppResult<Prompt> {
        let mut records = self.records.write().await;
        let prompt = records.get_mut(id)?;
        let fields = input.validate()?;
        prompt.replace_fields(fields, Utc::now());
        debug!(id, "replaced prompt");
        Ok(prompt.clone())
    }

    async fn patch(&self, id: &str, patch: PromptPatch) -> AppResult<Prompt> {
        let mut records = self.records.write().await;
        let prompt = records.get_mut(id)?;
        prompt.apply_patch(&patch, Utc::now())?;
        debug!(id, "patched prompt");
        Ok(prompt.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let removed = self.records.write().await.by_id.remove(id);
        match removed {
            Some(_) => {
                debug!(id, "deleted prompt");
                Ok(())
            }
            None => Err(AppError::not_found(id)),
        }
    }

    async fn mark_used(&self, id: &str) -> AppResult<Prompt> {
        let mut records = self.records.write().await;
        let prompt = records.get_mut(id)?;
        prompt.mark_used(Utc::now());
        debug!(id, use_count = prompt.use_count, "marked prompt used");
        Ok(prompt.clone())
    }
}
