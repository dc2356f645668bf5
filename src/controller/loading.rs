//! Section page loads and their completions

use anyhow::Result;

use super::DetailController;
use crate::model::{
    IngestOptions, MediaItem, MediaSource, PageRequest, RegistryError, Section, SectionRegistry, should_fetch_more,
};

impl<S: MediaSource> DetailController<S> {
    /// Fetches the next page of `section` and folds it into the model.
    ///
    /// Returns false without fetching when no screen is open or the section
    /// already has a load running in this session. A result that arrives
    /// after the screen was replaced is dropped.
    pub async fn load_section(&self, section: Section) -> bool {
        let Some((generation, main_item)) = self.model.session().await else {
            tracing::warn!(section = %section, "No detail screen open, skipping load");
            return false;
        };

        if !self.begin_load(generation, section).await {
            tracing::debug!(section = %section, "Section already loading");
            return false;
        }

        let fetched = self.fetch_page(generation, section, &main_item).await;
        self.end_load(generation, section).await;
        fetched
    }

    async fn fetch_page(&self, generation: u64, section: Section, main_item: &MediaItem) -> bool {
        let page_size = self.config.page_size;
        let page = self
            .model
            .with_session(generation, |registry| claim_page(registry, section, page_size))
            .await;

        let result = match page {
            None => {
                tracing::debug!(section = %section, "Screen changed before fetch, skipping load");
                return false;
            }
            Some(Ok(page)) => {
                tracing::debug!(section = %section, item_id = %main_item.id, offset = page.offset, "Loading section");
                self.source.fetch_section(section, main_item, page).await
            }
            Some(Err(e)) => Err(e.into()),
        };

        let limit = self.config.section_limit;
        match self
            .model
            .with_session(generation, |registry| apply_result(registry, section, result, limit))
            .await
        {
            Some(Ok(())) => {}
            Some(Err(e)) => tracing::error!(section = %section, error = %e, "Could not store section result"),
            None => tracing::debug!(section = %section, "Screen changed during fetch, dropping result"),
        }
        true
    }

    /// Applies a fetch outcome to the open screen: a batch is ingested with
    /// the section's options, a failure only stops the loading state.
    pub async fn complete(&self, section: Section, result: Result<Vec<MediaItem>>) -> Result<(), RegistryError> {
        let limit = self.config.section_limit;
        self.model
            .update(|registry| apply_result(registry, section, result, limit))
            .await
    }

    /// Loads the next page of a paginated section once `candidate` reaches
    /// the trigger position. Returns whether a load ran.
    pub async fn load_more_if_needed(&self, section: Section, candidate: &MediaItem) -> bool {
        if !section.is_paginated() {
            return false;
        }

        let items = match self.model.items(section).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(error = %e, "Cannot check section for more items");
                return false;
            }
        };

        if !should_fetch_more(candidate, &items) {
            return false;
        }

        tracing::debug!(section = %section, loaded = items.len(), "Reached end of section, loading more");
        self.load_section(section).await
    }
}

/// Window for the next fetch. Only paginated sections advance their
/// loaded count; the others always ask for the first page.
fn claim_page(registry: &mut SectionRegistry, section: Section, page_size: usize) -> Result<PageRequest, RegistryError> {
    let page = PageRequest::new(registry.loaded_count(section)?, page_size);
    if section.is_paginated() {
        registry.increase_loaded_count(section, page.limit)?;
    }
    Ok(page)
}

fn apply_result(
    registry: &mut SectionRegistry,
    section: Section,
    result: Result<Vec<MediaItem>>,
    section_limit: usize,
) -> Result<(), RegistryError> {
    match result {
        Ok(items) => {
            let options = IngestOptions::for_section(section, section_limit);
            let summary = registry.ingest(section, items, options)?;
            tracing::info!(
                section = %section,
                received = summary.received,
                kept = summary.kept,
                total = summary.total,
                "Section updated"
            );
        }
        Err(e) => {
            tracing::error!(section = %section, error = %e, "Section fetch failed");
            registry.fail(section)?;
        }
    }
    Ok(())
}
