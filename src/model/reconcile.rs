//! Deduplication of raw result batches before they reach a section

use std::collections::HashSet;

use super::media::MediaItem;
use super::types::Section;

/// Items kept from the first page of a non-paginated section
pub const DEFAULT_LIMIT: usize = 10;

/// How a batch is folded into its section
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IngestOptions {
    /// Upper bound on the stored list when replacing. Ignored when appending.
    pub limit: usize,
    /// Append the whole batch to the stored items instead of replacing them
    pub append: bool,
    /// Merge items whose titles match once a trailing "(...)" is dropped
    pub collapse_near_duplicates: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            append: false,
            collapse_near_duplicates: false,
        }
    }
}

impl IngestOptions {
    /// Options a section is always loaded with
    pub fn for_section(section: Section, limit: usize) -> Self {
        Self {
            limit,
            append: section.is_paginated(),
            collapse_near_duplicates: section.collapses_near_duplicates(),
        }
    }
}

/// Keeps the first item for every distinct id, preserving order.
pub fn dedup_by_id(items: Vec<MediaItem>) -> Vec<MediaItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect()
}

/// Cuts a title at its first `(` and drops one space left in front of it.
///
/// `"Thriller (Live)"` becomes `"Thriller"`, titles without a parenthesis
/// come back unchanged.
pub fn normalize_title(title: &str) -> &str {
    match title.find('(') {
        Some(index) => {
            let head = &title[..index];
            head.strip_suffix(' ').unwrap_or(head)
        }
        None => title,
    }
}

/// Replaces every title with its normalized form and keeps only the first
/// item per case-insensitive normalized title.
///
/// The stored title is the truncated one; the original qualifier is lost.
pub fn collapse_near_duplicates(items: Vec<MediaItem>) -> Vec<MediaItem> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut kept = Vec::with_capacity(items.len());

    for mut item in items {
        let normalized = normalize_title(&item.title);
        if normalized.len() != item.title.len() {
            item.title = normalized.to_string();
        }
        if seen.insert(item.title.to_lowercase()) {
            kept.push(item);
        }
    }

    kept
}

/// Exact-id pass followed, when asked for, by the near-duplicate pass.
pub fn deduplicate(items: Vec<MediaItem>, collapse: bool) -> Vec<MediaItem> {
    let unique = dedup_by_id(items);
    if collapse {
        collapse_near_duplicates(unique)
    } else {
        unique
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::media::MediaType;
    use crate::model::types::{AlbumSection, ArtistSection};

    fn album(id: &str, title: &str) -> MediaItem {
        MediaItem::new(id, title, MediaType::Album)
    }

    fn titles(items: &[MediaItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    fn ids(items: &[MediaItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test_log::test]
    fn dedup_keeps_first_occurrence() {
        let items = vec![album("a", "First"), album("b", "B"), album("a", "Second"), album("c", "C")];
        let unique = dedup_by_id(items);
        assert_eq!(ids(&unique), vec!["a", "b", "c"]);
        assert_eq!(unique[0].title, "First");
    }

    #[test_log::test]
    fn dedup_is_idempotent() {
        let items = vec![album("a", "A"), album("a", "A"), album("b", "B")];
        let once = dedup_by_id(items);
        let twice = dedup_by_id(once.clone());
        assert_eq!(once, twice);
    }

    #[test_log::test]
    fn normalize_strips_parenthetical_suffix() {
        assert_eq!(normalize_title("Album Name (Radio Edit)"), "Album Name");
        assert_eq!(normalize_title("Album Name(Radio Edit)"), "Album Name");
        assert_eq!(normalize_title("Album Name  (Live)"), "Album Name ");
        assert_eq!(normalize_title("Intro (Part 1) (Live)"), "Intro");
    }

    #[test_log::test]
    fn normalize_leaves_plain_titles_alone() {
        assert_eq!(normalize_title("Thriller"), "Thriller");
        assert_eq!(normalize_title(""), "");
        assert_eq!(normalize_title("Trailing space "), "Trailing space ");
        assert_eq!(normalize_title("(Untitled)"), "");
    }

    #[test_log::test]
    fn collapse_merges_qualified_titles() {
        let items = vec![
            album("1", "Thriller"),
            album("2", "Thriller (Remastered)"),
            album("3", "Thriller (Live)"),
        ];
        let collapsed = collapse_near_duplicates(items);
        assert_eq!(ids(&collapsed), vec!["1"]);
        assert_eq!(titles(&collapsed), vec!["Thriller"]);
    }

    #[test_log::test]
    fn collapse_uses_truncated_title_of_first_match() {
        let items = vec![album("1", "Bad (Special Edition)"), album("2", "BAD")];
        let collapsed = collapse_near_duplicates(items);
        assert_eq!(ids(&collapsed), vec!["1"]);
        assert_eq!(titles(&collapsed), vec!["Bad"]);
    }

    #[test_log::test]
    fn collapse_keeps_distinct_titles_in_order() {
        let items = vec![
            album("1", "Off the Wall"),
            album("2", "Thriller"),
            album("3", "off the wall (Deluxe)"),
            album("4", "Dangerous"),
        ];
        let collapsed = collapse_near_duplicates(items);
        assert_eq!(titles(&collapsed), vec!["Off the Wall", "Thriller", "Dangerous"]);
    }

    #[test_log::test]
    fn deduplicate_runs_id_pass_before_collapse() {
        let items = vec![
            album("1", "Bad (Live)"),
            album("1", "Something Else"),
            album("2", "Something Else"),
        ];
        let result = deduplicate(items, true);
        assert_eq!(ids(&result), vec!["1", "2"]);
        assert_eq!(titles(&result), vec!["Bad", "Something Else"]);
    }

    #[test_log::test]
    fn deduplicate_without_collapse_keeps_titles() {
        let items = vec![album("1", "Thriller"), album("2", "Thriller (Live)")];
        let result = deduplicate(items, false);
        assert_eq!(titles(&result), vec!["Thriller", "Thriller (Live)"]);
    }

    #[test_log::test]
    fn options_follow_section_policy() {
        let albums = IngestOptions::for_section(Section::Artist(ArtistSection::Albums), 10);
        assert!(albums.collapse_near_duplicates);
        assert!(!albums.append);

        let tracks = IngestOptions::for_section(Section::Album(AlbumSection::Tracks), 10);
        assert!(tracks.append);
        assert!(!tracks.collapse_near_duplicates);
    }
}
