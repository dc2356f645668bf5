//! Core type definitions for detail screens and their content sections

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sections shown on an artist's detail screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtistSection {
    TopTracks,
    Albums,
    Playlists,
}

impl ArtistSection {
    pub const ALL: [Self; 3] = [Self::TopTracks, Self::Albums, Self::Playlists];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistSection {
    Tracks,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlbumSection {
    Tracks,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowSection {
    Episodes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeSection {
    Details,
}

/// A scrollable content group within a detail screen.
///
/// The variant value itself is the registry key, so two sections are the
/// same entry exactly when they compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "screen", content = "section")]
pub enum Section {
    Artist(ArtistSection),
    Playlist(PlaylistSection),
    Album(AlbumSection),
    Show(ShowSection),
    Episode(EpisodeSection),
    ArtistBasicInfo,
}

impl Section {
    /// Every known section, in screen order
    pub const ALL: [Self; 8] = [
        Self::Artist(ArtistSection::TopTracks),
        Self::Artist(ArtistSection::Albums),
        Self::Artist(ArtistSection::Playlists),
        Self::Playlist(PlaylistSection::Tracks),
        Self::Album(AlbumSection::Tracks),
        Self::Show(ShowSection::Episodes),
        Self::Episode(EpisodeSection::Details),
        Self::ArtistBasicInfo,
    ];

    /// Stable string key, e.g. `artist.top_tracks`
    pub fn key(self) -> &'static str {
        match self {
            Self::Artist(ArtistSection::TopTracks) => "artist.top_tracks",
            Self::Artist(ArtistSection::Albums) => "artist.albums",
            Self::Artist(ArtistSection::Playlists) => "artist.playlists",
            Self::Playlist(PlaylistSection::Tracks) => "playlist.tracks",
            Self::Album(AlbumSection::Tracks) => "album.tracks",
            Self::Show(ShowSection::Episodes) => "show.episodes",
            Self::Episode(EpisodeSection::Details) => "episode.details",
            Self::ArtistBasicInfo => "artist_basic_info",
        }
    }

    /// Paginated sections append every fetched page instead of replacing
    /// their items with a bounded first page.
    pub fn is_paginated(self) -> bool {
        matches!(
            self,
            Self::Playlist(PlaylistSection::Tracks)
                | Self::Album(AlbumSection::Tracks)
                | Self::Show(ShowSection::Episodes)
        )
    }

    /// Sections whose titles name a work rather than a recording, where
    /// "Name" and "Name (Deluxe)" collapse into one entry.
    pub fn collapses_near_duplicates(self) -> bool {
        matches!(self, Self::Artist(ArtistSection::Albums))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Kind of detail screen, derived from the item that opened it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    Artist,
    Playlist,
    Album,
    Show,
    Episode,
}

impl ScreenKind {
    /// Sections loaded when this screen opens
    pub fn sections(self) -> &'static [Section] {
        match self {
            Self::Artist => &[
                Section::Artist(ArtistSection::TopTracks),
                Section::Artist(ArtistSection::Albums),
                Section::Artist(ArtistSection::Playlists),
            ],
            Self::Playlist => &[Section::Playlist(PlaylistSection::Tracks)],
            Self::Album => &[Section::ArtistBasicInfo, Section::Album(AlbumSection::Tracks)],
            Self::Show => &[Section::Show(ShowSection::Episodes)],
            Self::Episode => &[Section::Episode(EpisodeSection::Details)],
        }
    }
}

/// What a follow check asks about
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FollowTarget {
    Artist,
    Album,
    Show,
    Playlist { user_id: String },
}

/// Whether the current user follows (or has saved) an item
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowState {
    Following,
    NotFollowing,
    Error,
}

impl From<bool> for FollowState {
    fn from(following: bool) -> Self {
        if following {
            Self::Following
        } else {
            Self::NotFollowing
        }
    }
}

/// The screen a detail view was opened from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailScreenOrigin {
    Home,
    Search,
    Library,
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test_log::test]
    fn section_keys_are_unique() {
        let keys: HashSet<&str> = Section::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(keys.len(), Section::ALL.len());
    }

    #[test_log::test]
    fn every_screen_section_is_known() {
        let screens = [
            ScreenKind::Artist,
            ScreenKind::Playlist,
            ScreenKind::Album,
            ScreenKind::Show,
            ScreenKind::Episode,
        ];
        for screen in screens {
            for section in screen.sections() {
                assert!(Section::ALL.contains(section), "{section} missing from ALL");
            }
        }
    }

    #[test_log::test]
    fn artist_sections_cover_sub_enum() {
        let from_screen: Vec<Section> = ScreenKind::Artist.sections().to_vec();
        let from_enum: Vec<Section> = ArtistSection::ALL.into_iter().map(Section::Artist).collect();
        assert_eq!(from_screen, from_enum);
    }

    #[test_log::test]
    fn only_album_titles_collapse() {
        let collapsing: Vec<Section> = Section::ALL
            .into_iter()
            .filter(|s| s.collapses_near_duplicates())
            .collect();
        assert_eq!(collapsing, vec![Section::Artist(ArtistSection::Albums)]);
    }

    #[test_log::test]
    fn section_serializes_as_tagged_variant() {
        let json = serde_json::to_string(&Section::Artist(ArtistSection::TopTracks)).unwrap();
        assert_eq!(json, r#"{"screen":"artist","section":"top_tracks"}"#);

        let json = serde_json::to_string(&Section::ArtistBasicInfo).unwrap();
        assert_eq!(json, r#"{"screen":"artist_basic_info"}"#);
    }
}
