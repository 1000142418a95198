//! Filtering and ranking of prompt snapshots
//!
//! Everything here is a pure function over a caller-supplied slice: no I/O,
//! no re-sorting of the filtered output.

use crate::core::data::Prompt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How many entries the highlight views keep
pub const HIGHLIGHT_LIMIT: usize = 3;

/// Category predicate: either the `all` sentinel or an exact category name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    fn matches(&self, prompt: &Prompt) -> bool {
        match self {
            Self::All => true,
            Self::Only(name) => prompt.category.as_str() == name,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Only(name) => name,
        }
    }
}

/// The simultaneously applied predicates narrowing the displayed set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub search_term: Option<String>,
    pub category: CategoryFilter,
    pub tags: BTreeSet<String>,
    pub favorites_only: bool,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl AsRef<str>) -> Self {
        self.category = CategoryFilter::parse(category.as_ref());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn favorites_only(mut self, favorites_only: bool) -> Self {
        self.favorites_only = favorites_only;
        self
    }

    /// True when at least one predicate narrows the set
    pub fn is_active(&self) -> bool {
        self.normalized_term().is_some()
            || self.category != CategoryFilter::All
            || !self.tags.is_empty()
            || self.favorites_only
    }

    /// Lowercased term, untrimmed. A blank term matches everything.
    fn normalized_term(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(str::to_lowercase)
    }

    /// Whether a single prompt passes every predicate
    pub fn matches(&self, prompt: &Prompt) -> bool {
        self.matches_with_term(prompt, self.normalized_term().as_deref())
    }

    fn matches_with_term(&self, prompt: &Prompt, term: Option<&str>) -> bool {
        matches_term(prompt, term)
            && self.category.matches(prompt)
            && self.tags.iter().all(|tag| prompt.has_tag(tag))
            && (!self.favorites_only || prompt.is_favorite)
    }
}

fn matches_term(prompt: &Prompt, term: Option<&str>) -> bool {
    let Some(term) = term else {
        return true;
    };

    prompt.title.to_lowercase().contains(term)
        || prompt.content.to_lowercase().contains(term)
        || prompt.tags.iter().any(|t| t.to_lowercase().contains(term))
        || prompt.category.as_str().to_lowercase().contains(term)
}

/// Search engine for prompt filtering and ranking
pub struct SearchEngine;

impl SearchEngine {
    /// The prompts passing `criteria`, in input order
    pub fn select(prompts: &[Prompt], criteria: &FilterCriteria) -> Vec<Prompt> {
        let term = criteria.normalized_term();
        prompts
            .iter()
            .filter(|p| criteria.matches_with_term(p, term.as_deref()))
            .cloned()
            .collect()
    }

    /// First favorites in input order
    pub fn top_favorites(prompts: &[Prompt]) -> Vec<Prompt> {
        prompts
            .iter()
            .filter(|p| p.is_favorite)
            .take(HIGHLIGHT_LIMIT)
            .cloned()
            .collect()
    }

    /// Most used prompts; ties keep their input order
    pub fn top_used(prompts: &[Prompt]) -> Vec<Prompt> {
        let mut ranked: Vec<&Prompt> = prompts.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.use_count.cmp(&a.use_count));
        ranked.into_iter().take(HIGHLIGHT_LIMIT).cloned().collect()
    }
}
