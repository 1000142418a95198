//! Core data structures for the prompt gallery
//!
//! This module contains the prompt record, its category set, the typed
//! request schemas used by create/replace/patch, and the collection helpers
//! shared by the store, the API and the terminal front end.

use crate::utils::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// The fixed set of categories a prompt can belong to.
///
/// Deserialization is lenient: anything outside the set becomes `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Writing,
    Coding,
    Marketing,
    Study,
    Design,
    Business,
    Personal,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Writing,
        Category::Coding,
        Category::Marketing,
        Category::Study,
        Category::Design,
        Category::Business,
        Category::Personal,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Writing => "Writing",
            Category::Coding => "Coding",
            Category::Marketing => "Marketing",
            Category::Study => "Study",
            Category::Design => "Design",
            Category::Business => "Business",
            Category::Personal => "Personal",
            Category::Other => "Other",
        }
    }

    /// Exact lookup by name; `None` when the name is not in the set.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name.trim())
    }

    /// Lookup that falls back to `Other` for absent or unknown names.
    pub fn parse_or_default(name: Option<&str>) -> Self {
        name.and_then(Self::lookup).unwrap_or_default()
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::parse_or_default(Some(&value))
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single stored prompt with its usage metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub use_count: u64,
    pub last_used: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body accepted by create and replace.
///
/// Every field is optional at the type level so that a missing title is
/// reported as a validation failure rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

/// Body accepted by patch. Same field set as [`PromptInput`]; only the
/// supplied fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

/// Validated, defaulted mutable fields of a prompt
#[derive(Debug, Clone, PartialEq)]
pub struct PromptFields {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub is_favorite: bool,
}

fn required_text(field: &str, value: Option<&str>) -> AppResult<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        Some(_) => Err(AppError::validation(format!("{} must not be empty", field))),
        None => Err(AppError::validation(format!("{} is required", field))),
    }
}

impl PromptInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = Some(is_favorite);
        self
    }

    /// Validate required fields and fill schema defaults for the rest.
    pub fn validate(&self) -> AppResult<PromptFields> {
        Ok(PromptFields {
            title: required_text("title", self.title.as_deref())?,
            content: required_text("content", self.content.as_deref())?,
            category: Category::parse_or_default(self.category.as_deref()),
            tags: self.tags.clone().unwrap_or_default(),
            is_favorite: self.is_favorite.unwrap_or(false),
        })
    }
}

impl PromptPatch {
    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            is_favorite: Some(is_favorite),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Prompt {
    /// Build a fresh record from validated fields. `lastUsed` starts at the
    /// creation instant.
    pub fn new(fields: PromptFields, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: fields.title,
            content: fields.content,
            category: fields.category,
            tags: fields.tags,
            is_favorite: fields.is_favorite,
            use_count: 0,
            last_used: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full overwrite of the mutable fields. Usage statistics are kept.
    pub fn replace_fields(&mut self, fields: PromptFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.content = fields.content;
        self.category = fields.category;
        self.tags = fields.tags;
        self.is_favorite = fields.is_favorite;
        self.updated_at = now;
    }

    /// Merge the supplied fields. Nothing is written if any supplied field is
    /// invalid.
    pub fn apply_patch(&mut self, patch: &PromptPatch, now: DateTime<Utc>) -> AppResult<()> {
        let title = patch
            .title
            .as_deref()
            .map(|t| required_text("title", Some(t)))
            .transpose()?;
        let content = patch
            .content
            .as_deref()
            .map(|c| required_text("content", Some(c)))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(category) = &patch.category {
            self.category = Category::parse_or_default(Some(category));
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(is_favorite) = patch.is_favorite {
            self.is_favorite = is_favorite;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Record one use of the prompt
    pub fn mark_used(&mut self, now: DateTime<Utc>) {
        self.use_count += 1;
        if now > self.last_used {
            self.last_used = now;
        }
        self.updated_at = now;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.category)
    }
}

/// Collection of prompts, also the shape of the on-disk snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptCollection {
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

/// Statistics about the prompt collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptStats {
    pub total_prompts: usize,
    pub total_tags: usize,
    pub total_favorites: usize,
    pub total_uses: u64,
    pub tag_counts: HashMap<String, usize>,
    pub category_counts: HashMap<String, usize>,
}

impl PromptCollection {
    pub fn new(prompts: Vec<Prompt>) -> Self {
        Self { prompts }
    }

    /// Get all unique tags from the collection
    pub fn get_all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .prompts
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Calculate statistics for the collection
    pub fn get_stats(&self) -> PromptStats {
        let mut tag_counts = HashMap::new();
        let mut category_counts = HashMap::new();

        for prompt in &self.prompts {
            for tag in &prompt.tags {
                *tag_counts.entry(tag.clone()).or_insert(0) += 1;
            }
            *category_counts
                .entry(prompt.category.to_string())
                .or_insert(0) += 1;
        }

        PromptStats {
            total_prompts: self.prompts.len(),
            total_tags: self.prompts.iter().map(|p| p.tags.len()).sum(),
            total_favorites: self.prompts.iter().filter(|p| p.is_favorite).count(),
            total_uses: self.prompts.iter().map(|p| p.use_count).sum(),
            tag_counts,
            category_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_category_lookup_and_fallback() {
        assert_eq!(Category::lookup("Coding"), Some(Category::Coding));
        assert_eq!(Category::lookup("coding"), None);
        assert_eq!(Category::parse_or_default(Some("Gardening")), Category::Other);
        assert_eq!(Category::parse_or_default(None), Category::Other);

        let parsed: Category = serde_json::from_str("\"Nonsense\"").unwrap();
        assert_eq!(parsed, Category::Other);
        assert_eq!(serde_json::to_string(&Category::Study).unwrap(), "\"Study\"");
    }

    #[test]
    fn test_input_validation_trims_and_defaults() {
        let fields = PromptInput::new("  Title  ", "\tBody\n").validate().unwrap();
        assert_eq!(fields.title, "Title");
        assert_eq!(fields.content, "Body");
        assert_eq!(fields.category, Category::Other);
        assert!(fields.tags.is_empty());
        assert!(!fields.is_favorite);
    }

    #[test]
    fn test_input_validation_rejects_blank_fields() {
        let missing = PromptInput {
            content: Some("body".to_string()),
            ..PromptInput::default()
        };
        assert!(matches!(missing.validate(), Err(AppError::Validation(_))));

        let blank = PromptInput::new("title", "   ");
        assert!(matches!(blank.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_patch_is_all_or_nothing() {
        let now = Utc::now();
        let mut prompt = Prompt::new(PromptInput::new("t", "c").validate().unwrap(), now);
        let original = prompt.clone();

        let patch = PromptPatch {
            title: Some("  ".to_string()),
            is_favorite: Some(true),
            ..PromptPatch::default()
        };
        assert!(prompt.apply_patch(&patch, Utc::now()).is_err());
        assert_eq!(prompt, original);
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let prompt = Prompt::new(PromptInput::new("t", "c").validate().unwrap(), Utc::now());
        let value = serde_json::to_value(&prompt).unwrap();
        for key in ["id", "isFavorite", "useCount", "lastUsed", "createdAt", "updatedAt"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_input_rejects_wrong_types() {
        let result: Result<PromptInput, _> =
            serde_json::from_str(r#"{"title":"t","content":"c","tags":"x"}"#);
        assert!(result.is_err());
        let result: Result<PromptInput, _> =
            serde_json::from_str(r#"{"title":"t","content":"c","category":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_mark_used_takes_latest_call_time() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let first = created + Duration::minutes(5);
        let second = first + Duration::minutes(30);
        let mut prompt = Prompt::new(PromptInput::new("t", "c").validate().unwrap(), created);

        prompt.mark_used(first);
        assert_eq!(prompt.last_used, first);

        prompt.mark_used(second);
        assert_eq!(prompt.use_count, 2);
        assert_eq!(prompt.last_used, second);
        assert_eq!(prompt.updated_at, second);
        assert_eq!(prompt.created_at, created);
    }

    #[test]
    fn test_stats() {
        let now = Utc::now();
        let mut a = Prompt::new(
            PromptInput::new("a", "a").with_tags(["x", "y"]).favorite(true).validate().unwrap(),
            now,
        );
        a.mark_used(now);
        let b = Prompt::new(
            PromptInput::new("b", "b").with_category("Coding").with_tags(["x"]).validate().unwrap(),
            now,
        );
        let stats = PromptCollection::new(vec![a, b]).get_stats();

        assert_eq!(stats.total_prompts, 2);
        assert_eq!(stats.total_tags, 3);
        assert_eq!(stats.total_favorites, 1);
        assert_eq!(stats.total_uses, 1);
        assert_eq!(stats.tag_counts.get("x"), Some(&2));
        assert_eq!(stats.category_counts.get("Coding"), Some(&1));
    }

    #[test]
    fn test_all_tags_sorted_and_distinct() {
        let now = Utc::now();
        let collection = PromptCollection::new(vec![
            Prompt::new(PromptInput::new("a", "a").with_tags(["zeta", "alpha"]).validate().unwrap(), now),
            Prompt::new(PromptInput::new("b", "b").with_tags(["mid", "zeta"]).validate().unwrap(), now),
        ]);
        assert_eq!(collection.get_all_tags(), vec!["alpha", "mid", "zeta"]);
    }
}
