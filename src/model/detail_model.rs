//! Detail screen session state shared between the controller and readers

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, RwLock};

use super::media::MediaItem;
use super::reconcile::IngestOptions;
use super::registry::{IngestSummary, RegistryError, SectionRegistry, SectionState};
use super::types::{DetailScreenOrigin, FollowState, Section};

/// State of the currently open detail screen
#[derive(Clone)]
pub struct DetailModel {
    registry: Arc<Mutex<SectionRegistry>>,
    main_item: Arc<Mutex<Option<MediaItem>>>,
    origin: Arc<Mutex<Option<DetailScreenOrigin>>>,
    followed_ids: Arc<RwLock<HashMap<String, FollowState>>>,
    /// Bumped whenever the session is replaced. Only changed while every
    /// lock above is held.
    generation: Arc<AtomicU64>,
}

impl DetailModel {
    pub fn new() -> Self {
        let mut registry = SectionRegistry::new();
        registry.reset_all();

        Self {
            registry: Arc::new(Mutex::new(registry)),
            main_item: Arc::new(Mutex::new(None)),
            origin: Arc::new(Mutex::new(None)),
            followed_ids: Arc::new(RwLock::new(HashMap::new())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Forgets the open screen and resets every section.
    pub async fn clean(&self) {
        self.replace_session(None).await;
        tracing::debug!("Detail screen state cleared");
    }

    /// Starts a new session for `item`, dropping everything the previous
    /// screen left behind. Returns the new generation.
    pub async fn open_session(&self, item: MediaItem, origin: DetailScreenOrigin) -> u64 {
        let generation = self.replace_session(Some((item, origin))).await;
        tracing::debug!(generation, "Detail screen session started");
        generation
    }

    async fn replace_session(&self, next: Option<(MediaItem, DetailScreenOrigin)>) -> u64 {
        let mut registry = self.registry.lock().await;
        let mut main_item = self.main_item.lock().await;
        let mut origin = self.origin.lock().await;
        let mut followed_ids = self.followed_ids.write().await;

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        registry.reset_all();
        followed_ids.clear();
        (*main_item, *origin) = next.unzip();
        generation
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// The open screen's item together with its session generation.
    pub async fn session(&self) -> Option<(u64, MediaItem)> {
        let main_item = self.main_item.lock().await;
        main_item.clone().map(|item| (self.generation(), item))
    }

    /// Runs `f` on the sections while `generation` is still the open
    /// session. `None` once the screen has been replaced or cleared.
    pub async fn with_session<T>(&self, generation: u64, f: impl FnOnce(&mut SectionRegistry) -> T) -> Option<T> {
        let mut registry = self.registry.lock().await;
        (self.generation() == generation).then(|| f(&mut *registry))
    }

    /// Runs `f` on the sections of whatever session is open.
    pub async fn update<T>(&self, f: impl FnOnce(&mut SectionRegistry) -> T) -> T {
        f(&mut *self.registry.lock().await)
    }

    // ========================================================================
    // Screen
    // ========================================================================

    pub async fn main_item(&self) -> Option<MediaItem> {
        self.main_item.lock().await.clone()
    }

    pub async fn origin(&self) -> Option<DetailScreenOrigin> {
        *self.origin.lock().await
    }

    pub async fn set_follow_state(&self, item_id: &str, state: FollowState) {
        self.followed_ids.write().await.insert(item_id.to_string(), state);
    }

    /// Records a follow state only while `generation` is the open session.
    pub async fn set_follow_state_in(&self, generation: u64, item_id: &str, state: FollowState) -> bool {
        let mut followed_ids = self.followed_ids.write().await;
        if self.generation() != generation {
            return false;
        }
        followed_ids.insert(item_id.to_string(), state);
        true
    }

    pub async fn follow_state(&self, item_id: &str) -> Option<FollowState> {
        self.followed_ids.read().await.get(item_id).copied()
    }

    // ========================================================================
    // Sections
    // ========================================================================

    pub async fn reset_sections(&self, sections: impl IntoIterator<Item = Section>) {
        self.registry.lock().await.reset(sections);
    }

    pub async fn ingest(
        &self,
        section: Section,
        items: Vec<MediaItem>,
        options: IngestOptions,
    ) -> Result<IngestSummary, RegistryError> {
        self.registry.lock().await.ingest(section, items, options)
    }

    pub async fn fail(&self, section: Section) -> Result<(), RegistryError> {
        self.registry.lock().await.fail(section)
    }

    pub async fn increase_loaded_count(&self, section: Section, by: usize) -> Result<usize, RegistryError> {
        self.registry.lock().await.increase_loaded_count(section, by)
    }

    pub async fn is_loading(&self, section: Section) -> Result<bool, RegistryError> {
        self.registry.lock().await.is_loading(section)
    }

    pub async fn items(&self, section: Section) -> Result<Vec<MediaItem>, RegistryError> {
        Ok(self.registry.lock().await.items(section)?.to_vec())
    }

    pub async fn loaded_count(&self, section: Section) -> Result<usize, RegistryError> {
        self.registry.lock().await.loaded_count(section)
    }

    pub async fn section_state(&self, section: Section) -> Result<SectionState, RegistryError> {
        self.registry.lock().await.state(section).cloned()
    }

    /// Artists credited on the open album
    pub async fn artist_basic_info(&self) -> Result<Vec<MediaItem>, RegistryError> {
        self.items(Section::ArtistBasicInfo).await
    }
}

impl Default for DetailModel {
    fn default() -> Self {
        Self::new()
    }
}
