use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use catalog::{render, scan_library, CatalogError};
use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Clone)]
pub struct CatalogCache {
    root: PathBuf,
    snapshot: Arc<RwLock<Arc<str>>>,
}

impl CatalogCache {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            snapshot: Arc::new(RwLock::new(Arc::from(""))),
        }
    }

    // Scan and render run off-lock; a failed scan leaves the previous
    // snapshot in place.
    pub fn refresh(&self) -> Result<(usize, usize), CatalogError> {
        let artists = scan_library(&self.root)?;
        let discs: usize = artists.iter().map(|artist| artist.discs.len()).sum();
        self.install(render(&artists));
        Ok((artists.len(), discs))
    }

    // The lock is held only while the snapshot handle is cloned.
    pub fn current(&self) -> Arc<str> {
        self.snapshot.read().clone()
    }

    fn install(&self, text: String) {
        *self.snapshot.write() = Arc::from(text);
    }
}

pub fn spawn_refresh(cache: CatalogCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let worker = cache.clone();
            let result = tokio::task::spawn_blocking(move || worker.refresh()).await;
            match result {
                Ok(Ok((artists, discs))) => {
                    info!("Catalog refreshed: {} artists, {} discs", artists, discs);
                }
                Ok(Err(err)) => {
                    warn!("Catalog refresh failed: {}; keeping previous listing", err);
                }
                Err(err) => {
                    warn!("Catalog refresh join error: {}", err);
                }
            }
        }
    })
}
