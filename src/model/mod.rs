//! Model module - Detail screen state and data types
//!
//! - `types`: Section keys, screen kinds, follow state
//! - `media`: Catalog items handed over by the fetch layer
//! - `reconcile`: Duplicate and near-duplicate removal
//! - `registry`: Per-section items, loading flag and loaded count
//! - `paging`: "Load more" trigger and page requests
//! - `source`: The fetch layer trait
//! - `spotify_client`: Spotify Web API implementation of the fetch layer
//! - `detail_model`: Shared state of the open detail screen

mod types;
mod media;
mod reconcile;
mod registry;
mod paging;
mod source;
mod spotify_client;
mod detail_model;

pub use types::{
    AlbumSection, ArtistSection, DetailScreenOrigin, EpisodeSection, FollowState, FollowTarget,
    PlaylistSection, ScreenKind, Section, ShowSection,
};

pub use media::{MediaItem, MediaType};

pub use reconcile::{
    DEFAULT_LIMIT, IngestOptions, collapse_near_duplicates, dedup_by_id, deduplicate, normalize_title,
};

pub use registry::{IngestSummary, RegistryError, SectionRegistry, SectionState};

pub use paging::{PageRequest, should_fetch_more};

pub use source::MediaSource;

pub use spotify_client::SpotifyClient;

pub use detail_model::DetailModel;
