// Business logic management modules
pub mod config; // Configuration management
pub mod crud; // Create, show, edit, favorite, use, delete
pub mod query; // Listing, highlights, stats
pub mod serve; // REST server startup

pub use config::handle_config_command;
pub use crud::{
    handle_delete_command, handle_edit_command, handle_fav_command, handle_new_command,
    handle_show_command, handle_use_command,
};
pub use query::handle_list_command;
pub use serve::handle_serve_command;

use crate::api::SharedStore;
use crate::client::HttpStore;
use crate::config::{Config, StorageBackend};
use crate::core::data::{PromptCollection, PromptStats};
use crate::core::search::FilterCriteria;
use crate::core::state::{GalleryState, GalleryView};
use crate::core::store::MemoryStore;
use crate::storage::FileStore;
use crate::utils::error::AppResult;
use crate::utils::print_warning;
use std::sync::Arc;
use tracing::debug;

/// The store a CLI command talks to. Remote backends also answer filtered
/// listings, highlights and statistics server-side.
pub struct Backend {
    store: SharedStore,
    remote: Option<Arc<HttpStore>>,
}

impl Backend {
    /// A `--server` URL wins over the configured backend
    pub async fn connect(config: &Config, server: Option<&str>) -> AppResult<Self> {
        match server {
            Some(url) => {
                debug!(url, "using remote prompt store");
                Ok(Self::remote(Arc::new(HttpStore::new(url)?)))
            }
            None => Self::local(config).await,
        }
    }

    async fn local(config: &Config) -> AppResult<Self> {
        match config.storage.backend {
            StorageBackend::File => {
                let store = FileStore::open(&config.storage.prompt_file).await?;
                debug!(path = %store.path().display(), "using prompt file");
                Ok(Self::from_store(Arc::new(store)))
            }
            StorageBackend::Memory => {
                print_warning("Memory backend selected; changes are discarded on exit");
                Ok(Self::from_store(Arc::new(MemoryStore::new())))
            }
        }
    }

    pub fn from_store(store: SharedStore) -> Self {
        Self {
            store,
            remote: None,
        }
    }

    pub fn remote(client: Arc<HttpStore>) -> Self {
        Self {
            store: client.clone(),
            remote: Some(client),
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// The gallery view for `criteria`
    pub async fn view(&self, criteria: FilterCriteria) -> AppResult<GalleryView> {
        let Some(remote) = &self.remote else {
            let mut state = GalleryState::new(self.store.list().await?);
            state.set_criteria(criteria);
            return Ok(state.view());
        };

        let filters_active = criteria.is_active();
        let filtered = remote.search(&criteria).await?;
        let highlights = remote.highlights().await?;
        let total = if filters_active {
            remote.stats().await?.total_prompts
        } else {
            filtered.len()
        };

        Ok(GalleryView {
            filtered,
            favorites: highlights.favorites,
            frequent: highlights.frequent,
            total,
            filters_active,
        })
    }

    pub async fn stats(&self) -> AppResult<PromptStats> {
        match &self.remote {
            Some(remote) => remote.stats().await,
            None => Ok(PromptCollection::new(self.store.list().await?).get_stats()),
        }
    }
}
