//! Catalog entries as handed over by the fetch layer

use serde::{Deserialize, Serialize};

use super::types::ScreenKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Track,
    Album,
    Artist,
    Playlist,
    Show,
    Episode,
}

impl MediaType {
    /// Detail screen opened for an item of this type, if any
    pub fn screen(self) -> Option<ScreenKind> {
        match self {
            Self::Track => None,
            Self::Album => Some(ScreenKind::Album),
            Self::Artist => Some(ScreenKind::Artist),
            Self::Playlist => Some(ScreenKind::Playlist),
            Self::Show => Some(ScreenKind::Show),
            Self::Episode => Some(ScreenKind::Episode),
        }
    }
}

/// A catalog entry.
///
/// Only `id` and `title` take part in reconciliation; the remaining fields
/// are carried through untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    pub media_type: MediaType,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub author_ids: Vec<String>,
    /// Owning album for tracks, owning show for episodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
}

impl MediaItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            media_type,
            authors: Vec::new(),
            author_ids: Vec::new(),
            parent_id: None,
            image_url: None,
            release_date: None,
            duration_ms: None,
        }
    }

    pub fn uri(&self) -> String {
        let kind = match self.media_type {
            MediaType::Track => "track",
            MediaType::Album => "album",
            MediaType::Artist => "artist",
            MediaType::Playlist => "playlist",
            MediaType::Show => "show",
            MediaType::Episode => "episode",
        };
        format!("spotify:{}:{}", kind, self.id)
    }
}
