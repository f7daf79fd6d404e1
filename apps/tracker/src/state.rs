use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;

use crate::config::Config;
use crate::errors::AppError;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The store assumes a single writer. Every read-modify-write cycle runs
    /// under this lock, and the lock is never held across an `.await`.
    pub store: Arc<Mutex<RecordStore>>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, store: RecordStore) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
            config,
        }
    }

    pub fn lock_store(&self) -> Result<MutexGuard<'_, RecordStore>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::Internal(anyhow!("record store lock poisoned")))
    }
}
