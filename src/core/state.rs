//! Client-side gallery state
//!
//! A snapshot of the store plus the active criteria. Mutations returned by
//! the store are merged in with [`GalleryState::upsert`] / [`GalleryState::remove`]
//! and every render derives a fresh [`GalleryView`].

use crate::core::data::Prompt;
use crate::core::search::{FilterCriteria, SearchEngine};
use serde::{Deserialize, Serialize};

/// Everything a front end needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryView {
    pub filtered: Vec<Prompt>,
    pub favorites: Vec<Prompt>,
    pub frequent: Vec<Prompt>,
    pub total: usize,
    pub filters_active: bool,
}

/// The two highlight views, independent of the active filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    pub favorites: Vec<Prompt>,
    pub frequent: Vec<Prompt>,
}

impl Highlights {
    pub fn from_prompts(prompts: &[Prompt]) -> Self {
        Self {
            favorites: SearchEngine::top_favorites(prompts),
            frequent: SearchEngine::top_used(prompts),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.frequent.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    prompts: Vec<Prompt>,
    criteria: FilterCriteria,
}

impl GalleryState {
    /// Start from a newest-first listing
    pub fn new(prompts: Vec<Prompt>) -> Self {
        Self {
            prompts,
            criteria: FilterCriteria::default(),
        }
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Merge a record returned by a mutation. Known ids are updated in place;
    /// new ones go to the front, matching the newest-first listing.
    pub fn upsert(&mut self, prompt: Prompt) {
        match self.prompts.iter_mut().find(|p| p.id == prompt.id) {
            Some(existing) => *existing = prompt,
            None => self.prompts.insert(0, prompt),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Prompt> {
        let idx = self.prompts.iter().position(|p| p.id == id)?;
        Some(self.prompts.remove(idx))
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Add the tag to the filter set, or drop it if already selected
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.criteria.tags.remove(tag) {
            self.criteria.tags.insert(tag.to_string());
        }
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    pub fn has_active_filters(&self) -> bool {
        self.criteria.is_active()
    }

    /// Derive the displayed subset and highlight views from the current
    /// snapshot. Nothing derived is cached.
    pub fn view(&self) -> GalleryView {
        let highlights = Highlights::from_prompts(&self.prompts);
        GalleryView {
            filtered: SearchEngine::select(&self.prompts, &self.criteria),
            favorites: highlights.favorites,
            frequent: highlights.frequent,
            total: self.prompts.len(),
            filters_active: self.criteria.is_active(),
        }
    }
}
