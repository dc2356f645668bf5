//! Per-section state: accumulated items, loading flag, and loaded count

use std::collections::HashMap;

use thiserror::Error;

use super::media::MediaItem;
use super::reconcile::{IngestOptions, deduplicate};
use super::types::Section;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("section {0} was used before being reset")]
    UnknownSection(Section),
}

/// State of one section. All three fields are created and reset together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionState {
    pub items: Vec<MediaItem>,
    pub loading: bool,
    pub loaded_count: usize,
}

impl Default for SectionState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            loaded_count: 0,
        }
    }
}

/// Result of folding one batch into a section
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IngestSummary {
    pub received: usize,
    pub kept: usize,
    pub total: usize,
}

/// Owns the state of every section of the open detail screen.
#[derive(Clone, Debug, Default)]
pub struct SectionRegistry {
    sections: HashMap<Section, SectionState>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts each given section back to `{[], loading, 0}`, adding it if unseen.
    pub fn reset(&mut self, sections: impl IntoIterator<Item = Section>) {
        for section in sections {
            self.sections.insert(section, SectionState::default());
        }
    }

    pub fn reset_all(&mut self) {
        self.reset(Section::ALL);
    }

    pub fn state(&self, section: Section) -> Result<&SectionState, RegistryError> {
        self.sections
            .get(&section)
            .ok_or(RegistryError::UnknownSection(section))
    }

    fn state_mut(&mut self, section: Section) -> Result<&mut SectionState, RegistryError> {
        self.sections
            .get_mut(&section)
            .ok_or(RegistryError::UnknownSection(section))
    }

    pub fn is_loading(&self, section: Section) -> Result<bool, RegistryError> {
        Ok(self.state(section)?.loading)
    }

    pub fn items(&self, section: Section) -> Result<&[MediaItem], RegistryError> {
        Ok(&self.state(section)?.items)
    }

    pub fn loaded_count(&self, section: Section) -> Result<usize, RegistryError> {
        Ok(self.state(section)?.loaded_count)
    }

    /// Counts requested items, not the ones that survived deduplication.
    pub fn increase_loaded_count(&mut self, section: Section, by: usize) -> Result<usize, RegistryError> {
        let state = self.state_mut(section)?;
        state.loaded_count += by;
        Ok(state.loaded_count)
    }

    /// Deduplicates `raw` and either replaces the section's items with the
    /// first `limit` survivors or appends all of them. Clears `loading`.
    ///
    /// Appending does not deduplicate against items already stored.
    pub fn ingest(
        &mut self,
        section: Section,
        raw: Vec<MediaItem>,
        options: IngestOptions,
    ) -> Result<IngestSummary, RegistryError> {
        let state = self.state_mut(section)?;
        let received = raw.len();
        let mut unique = deduplicate(raw, options.collapse_near_duplicates);

        if !options.append {
            unique.truncate(options.limit);
        }
        let kept = unique.len();

        if options.append {
            state.items.append(&mut unique);
        } else {
            state.items = unique;
        }
        state.loading = false;

        Ok(IngestSummary {
            received,
            kept,
            total: state.items.len(),
        })
    }

    /// Marks a failed fetch: loading stops, stored items stay as they were.
    pub fn fail(&mut self, section: Section) -> Result<(), RegistryError> {
        self.state_mut(section)?.loading = false;
        Ok(())
    }
}
