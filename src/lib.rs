//! Prompt Gallery - a store of reusable AI prompts
//!
//! This library provides the prompt entity and its stores, the REST resource
//! API served over them, the filter/search engine behind the gallery views,
//! and the terminal client built on top.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod manager;
pub mod storage;
pub mod utils;

// Re-export core types and traits for easier use
pub use client::HttpStore;
pub use core::{
    data::{Category, Prompt, PromptCollection, PromptInput, PromptPatch, PromptStats},
    search::{CategoryFilter, FilterCriteria, SearchEngine},
    state::{GalleryState, GalleryView, Highlights},
    store::MemoryStore,
    traits::PromptStore,
};
pub use storage::FileStore;
pub use utils::error::{AppError, AppResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
