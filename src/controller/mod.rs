//! Controller module - Drives detail screens
//!
//! The controller opens detail screens, fans the section loads out to the
//! fetch layer, and routes every completion back into the `DetailModel`.
//!
//! - `screen`: Opening a screen, per-screen loads and follow checks
//! - `loading`: Page loads, completions and "load more"

mod screen;
mod loading;

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::DetailConfig;
use crate::model::{DetailModel, MediaSource, Section};

pub struct DetailController<S> {
    pub(crate) model: DetailModel,
    pub(crate) source: Arc<S>,
    pub(crate) config: Arc<DetailConfig>,
    current_user_id: Option<String>,
    /// Sections with a fetch outstanding, per session generation; at most
    /// one per section.
    in_flight: Arc<Mutex<HashSet<(u64, Section)>>>,
}

impl<S> Clone for DetailController<S> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            source: Arc::clone(&self.source),
            config: Arc::clone(&self.config),
            current_user_id: self.current_user_id.clone(),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<S: MediaSource> DetailController<S> {
    pub fn new(model: DetailModel, source: S, config: DetailConfig) -> Self {
        Self {
            model,
            source: Arc::new(source),
            config: Arc::new(config),
            current_user_id: None,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Needed for playlist follow checks
    pub fn with_current_user(mut self, user_id: impl Into<String>) -> Self {
        self.current_user_id = Some(user_id.into());
        self
    }

    pub fn model(&self) -> &DetailModel {
        &self.model
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Claims `section` of session `generation` for a fetch. False when one
    /// is already running.
    async fn begin_load(&self, generation: u64, section: Section) -> bool {
        self.in_flight.lock().await.insert((generation, section))
    }

    async fn end_load(&self, generation: u64, section: Section) {
        self.in_flight.lock().await.remove(&(generation, section));
    }
}
