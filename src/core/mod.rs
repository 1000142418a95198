// Core functionality modules
pub mod data;
pub mod search;
pub mod state;
pub mod store;
pub mod traits;

pub use data::{Category, Prompt, PromptCollection, PromptInput, PromptPatch, PromptStats};
pub use search::{CategoryFilter, FilterCriteria, SearchEngine};
pub use state::{GalleryState, GalleryView, Highlights};
pub use store::MemoryStore;
pub use traits::PromptStore;
