//! "Load more" trigger and page requests

use super::media::MediaItem;

/// Lists this short never ask for another page
const MIN_ITEMS_FOR_FETCH_MORE: usize = 5;
/// Position from the end of the list that triggers the next fetch
const FETCH_MORE_DISTANCE_FROM_END: usize = 4;

/// True when `candidate` is the 4th item from the end of a list holding
/// more than five items.
///
/// Fires ahead of the real end so the next page arrives before the user
/// scrolls past the last item.
pub fn should_fetch_more(candidate: &MediaItem, items: &[MediaItem]) -> bool {
    if items.len() <= MIN_ITEMS_FOR_FETCH_MORE {
        return false;
    }
    items[items.len() - FETCH_MORE_DISTANCE_FROM_END].id == candidate.id
}

/// A window into a paginated section
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    pub fn first(limit: usize) -> Self {
        Self::new(0, limit)
    }

    pub fn offset_u32(&self) -> u32 {
        u32::try_from(self.offset).unwrap_or(u32::MAX)
    }

    pub fn limit_u32(&self) -> u32 {
        u32::try_from(self.limit).unwrap_or(u32::MAX)
    }
}
