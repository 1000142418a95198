use crate::api::{self, SharedStore};
use crate::cli::ServeArgs;
use crate::config::{Config, StorageBackend};
use crate::core::store::MemoryStore;
use crate::storage::FileStore;
use crate::utils::error::AppResult;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn handle_serve_command(mut config: Config, args: &ServeArgs) -> AppResult<()> {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let store = open_store(&config).await;
    api::serve(&config, store).await
}

/// The server keeps running on an in-memory store when the prompt file
/// cannot be opened.
pub async fn open_store(config: &Config) -> SharedStore {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory prompt store");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::File => match FileStore::open(&config.storage.prompt_file).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!("{}; falling back to in-memory store", e);
                Arc::new(MemoryStore::new())
            }
        },
    }
}
