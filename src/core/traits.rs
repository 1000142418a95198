//! Core trait definitions for prompt storage
//!
//! `PromptStore` is the seam between the resource API and whatever keeps the
//! records: the in-memory store, the TOML file store, or a remote server.

use crate::core::data::{Prompt, PromptInput, PromptPatch};
use crate::utils::error::AppResult;
use async_trait::async_trait;

/// Storage operations for prompts
///
/// Every mutating operation is atomic with respect to a single record.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Validate, default and insert a new prompt
    async fn create(&self, input: PromptInput) -> AppResult<Prompt>;

    /// Fetch one prompt
    async fn get(&self, id: &str) -> AppResult<Prompt>;

    /// All prompts, newest first
    async fn list(&self) -> AppResult<Vec<Prompt>>;

    /// Overwrite every mutable field; omitted fields take schema defaults
    async fn replace(&self, id: &str, input: PromptInput) -> AppResult<Prompt>;

    /// Merge only the supplied fields
    async fn patch(&self, id: &str, patch: PromptPatch) -> AppResult<Prompt>;

    /// Remove a prompt permanently
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Increment the use counter and refresh `lastUsed`
    async fn mark_used(&self, id: &str) -> AppResult<Prompt>;
}
