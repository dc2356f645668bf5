//! The fetch layer a detail screen pulls its sections from

use std::future::Future;

use anyhow::Result;

use super::media::MediaItem;
use super::paging::PageRequest;
use super::types::{FollowTarget, Section};

/// Supplies raw result batches and follow checks for detail screens.
///
/// Batches are handed over as received; deduplication happens on ingest.
pub trait MediaSource: Send + Sync + 'static {
    /// Fetches one page of `section` for the screen opened on `main_item`.
    fn fetch_section(
        &self,
        section: Section,
        main_item: &MediaItem,
        page: PageRequest,
    ) -> impl Future<Output = Result<Vec<MediaItem>>> + Send;

    /// Whether the current user follows or has saved `item_id`.
    fn check_follows(&self, target: &FollowTarget, item_id: &str) -> impl Future<Output = Result<bool>> + Send;
}
