// src/state.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::services::StringService;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub strings: StringService,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Wire the service layer over an explicitly provided store
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            strings: StringService::new(store),
            started_at: Utc::now(),
        }
    }
}
