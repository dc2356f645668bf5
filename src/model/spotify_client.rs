//! Spotify Web API backed `MediaSource`

use std::sync::Arc;

use anyhow::{Result, anyhow};
use rspotify::{
    AuthCodeSpotify,
    model::{
        AlbumId, ArtistId, EpisodeId, FullArtist, FullEpisode, FullTrack, Image, Market, PlayableItem,
        PlaylistId, SearchResult, SearchType, ShowId, SimplifiedAlbum, SimplifiedEpisode, SimplifiedPlaylist,
        SimplifiedTrack, UserId,
    },
    prelude::*,
};

use super::media::{MediaItem, MediaType};
use super::paging::PageRequest;
use super::source::MediaSource;
use super::types::{
    AlbumSection, ArtistSection, EpisodeSection, FollowTarget, PlaylistSection, Section, ShowSection,
};
use crate::{log_api_request, log_api_result};

/// Spotify API client feeding detail screen sections
#[derive(Clone)]
pub struct SpotifyClient {
    client: Arc<AuthCodeSpotify>,
    market: Option<Market>,
}

impl SpotifyClient {
    pub fn new(client: AuthCodeSpotify, market_from_token: bool) -> Self {
        Self {
            client: Arc::new(client),
            market: market_from_token.then_some(Market::FromToken),
        }
    }

    async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<MediaItem>> {
        let id = ArtistId::from_id(artist_id)?;
        let tracks = self.client.artist_top_tracks(id, self.market).await?;
        Ok(tracks.into_iter().map(from_full_track).collect())
    }

    async fn artist_albums(&self, artist_id: &str, page: PageRequest) -> Result<Vec<MediaItem>> {
        let id = ArtistId::from_id(artist_id)?;
        let albums = self
            .client
            .artist_albums_manual(id, None, self.market, Some(page.limit_u32()), Some(page.offset_u32()))
            .await?;
        Ok(albums.items.into_iter().map(from_simplified_album).collect())
    }

    /// Playlists are found by searching for the artist's name.
    async fn artist_playlists(&self, artist_name: &str, page: PageRequest) -> Result<Vec<MediaItem>> {
        let result = self
            .client
            .search(
                artist_name,
                SearchType::Playlist,
                self.market,
                None,
                Some(page.limit_u32()),
                Some(page.offset_u32()),
            )
            .await?;

        match result {
            SearchResult::Playlists(playlists) => {
                Ok(playlists.items.into_iter().map(from_simplified_playlist).collect())
            }
            _ => Err(anyhow!("Playlist search returned another result type")),
        }
    }

    async fn playlist_tracks(&self, playlist_id: &str, page: PageRequest) -> Result<Vec<MediaItem>> {
        let id = PlaylistId::from_id(playlist_id)?;
        let items = self
            .client
            .playlist_items_manual(id, None, self.market, Some(page.limit_u32()), Some(page.offset_u32()))
            .await?;

        let mut tracks = Vec::with_capacity(items.items.len());
        for item in items.items {
            match item.track {
                Some(PlayableItem::Track(track)) => tracks.push(from_full_track(track)),
                Some(PlayableItem::Episode(episode)) => tracks.push(from_full_episode(episode)),
                _ => {}
            }
        }
        Ok(tracks)
    }

    async fn album_tracks(&self, album: &MediaItem, page: PageRequest) -> Result<Vec<MediaItem>> {
        let id = AlbumId::from_id(&album.id)?;
        let tracks = self
            .client
            .album_track_manual(id, self.market, Some(page.limit_u32()), Some(page.offset_u32()))
            .await?;

        Ok(tracks
            .items
            .into_iter()
            .map(|track| {
                let mut item = from_simplified_track(track);
                item.parent_id = Some(album.id.clone());
                item.image_url.clone_from(&album.image_url);
                item
            })
            .collect())
    }

    /// Artists credited on an album, from the item itself when it carries
    /// their ids, otherwise from the full album.
    async fn album_artists(&self, album: &MediaItem) -> Result<Vec<MediaItem>> {
        let artist_ids: Vec<String> = if album.author_ids.is_empty() {
            let full = self.client.album(AlbumId::from_id(&album.id)?, self.market).await?;
            full.artists
                .into_iter()
                .filter_map(|artist| artist.id.map(|id| id.id().to_string()))
                .collect()
        } else {
            album.author_ids.clone()
        };

        if artist_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = artist_ids
            .iter()
            .map(|id| ArtistId::from_id(id.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let artists = self.client.artists(ids).await?;
        Ok(artists.into_iter().map(from_full_artist).collect())
    }

    async fn show_episodes(&self, show_id: &str, page: PageRequest) -> Result<Vec<MediaItem>> {
        let id = ShowId::from_id(show_id)?;
        let episodes = self
            .client
            .get_shows_episodes_manual(id, self.market, Some(page.limit_u32()), Some(page.offset_u32()))
            .await?;

        Ok(episodes
            .items
            .into_iter()
            .map(|episode| {
                let mut item = from_simplified_episode(episode);
                item.parent_id = Some(show_id.to_string());
                item
            })
            .collect())
    }

    async fn episode_details(&self, episode_id: &str) -> Result<Vec<MediaItem>> {
        let id = EpisodeId::from_id(episode_id)?;
        let episode = self.client.get_an_episode(id, self.market).await?;
        Ok(vec![from_full_episode(episode)])
    }

    async fn fetch(&self, section: Section, main_item: &MediaItem, page: PageRequest) -> Result<Vec<MediaItem>> {
        match section {
            Section::Artist(ArtistSection::TopTracks) => self.artist_top_tracks(&main_item.id).await,
            Section::Artist(ArtistSection::Albums) => self.artist_albums(&main_item.id, page).await,
            Section::Artist(ArtistSection::Playlists) => self.artist_playlists(&main_item.title, page).await,
            Section::Playlist(PlaylistSection::Tracks) => self.playlist_tracks(&main_item.id, page).await,
            Section::Album(AlbumSection::Tracks) => self.album_tracks(main_item, page).await,
            Section::Show(ShowSection::Episodes) => self.show_episodes(&main_item.id, page).await,
            Section::Episode(EpisodeSection::Details) => self.episode_details(&main_item.id).await,
            Section::ArtistBasicInfo => self.album_artists(main_item).await,
        }
    }

    async fn follows(&self, target: &FollowTarget, item_id: &str) -> Result<bool> {
        let flags = match target {
            FollowTarget::Artist => {
                self.client
                    .user_artist_check_follow([ArtistId::from_id(item_id)?])
                    .await?
            }
            FollowTarget::Album => {
                self.client
                    .current_user_saved_albums_contains([AlbumId::from_id(item_id)?])
                    .await?
            }
            FollowTarget::Show => self.client.check_users_saved_shows([ShowId::from_id(item_id)?]).await?,
            FollowTarget::Playlist { user_id } => {
                let user = UserId::from_id(user_id.as_str())?;
                self.client
                    .playlist_check_follow(PlaylistId::from_id(item_id)?, &[user])
                    .await?
            }
        };
        Ok(flags.first().copied().unwrap_or(false))
    }
}

impl MediaSource for SpotifyClient {
    async fn fetch_section(&self, section: Section, main_item: &MediaItem, page: PageRequest) -> Result<Vec<MediaItem>> {
        log_api_request!(
            section.key(),
            item_id = %main_item.id,
            offset = page.offset,
            limit = page.limit
        );
        let result = self.fetch(section, main_item, page).await;
        log_api_result!(section.key(), result);
        result
    }

    async fn check_follows(&self, target: &FollowTarget, item_id: &str) -> Result<bool> {
        log_api_request!("check_follows", item_id, target = ?target);
        let result = self.follows(target, item_id).await;
        log_api_result!("check_follows", result);
        result
    }
}

// ============================================================================
// rspotify model conversion
// ============================================================================

fn first_image(images: &[Image]) -> Option<String> {
    images.first().map(|image| image.url.clone())
}

fn duration_ms(milliseconds: i64) -> Option<u32> {
    u32::try_from(milliseconds).ok()
}

fn from_full_track(track: FullTrack) -> MediaItem {
    let id = track.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default();
    let mut item = MediaItem::new(id, track.name, MediaType::Track);
    item.authors = track.artists.iter().map(|a| a.name.clone()).collect();
    item.author_ids = track
        .artists
        .iter()
        .filter_map(|a| a.id.as_ref().map(|id| id.id().to_string()))
        .collect();
    item.parent_id = track.album.id.as_ref().map(|id| id.id().to_string());
    item.image_url = first_image(&track.album.images);
    item.release_date = track.album.release_date.clone();
    item.duration_ms = duration_ms(track.duration.num_milliseconds());
    item
}

fn from_simplified_track(track: SimplifiedTrack) -> MediaItem {
    let id = track.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default();
    let mut item = MediaItem::new(id, track.name, MediaType::Track);
    item.authors = track.artists.iter().map(|a| a.name.clone()).collect();
    item.author_ids = track
        .artists
        .iter()
        .filter_map(|a| a.id.as_ref().map(|id| id.id().to_string()))
        .collect();
    item.duration_ms = duration_ms(track.duration.num_milliseconds());
    item
}

fn from_simplified_album(album: SimplifiedAlbum) -> MediaItem {
    let id = album.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default();
    let mut item = MediaItem::new(id, album.name, MediaType::Album);
    item.authors = album.artists.iter().map(|a| a.name.clone()).collect();
    item.author_ids = album
        .artists
        .iter()
        .filter_map(|a| a.id.as_ref().map(|id| id.id().to_string()))
        .collect();
    item.image_url = first_image(&album.images);
    item.release_date = album.release_date;
    item
}

fn from_simplified_playlist(playlist: SimplifiedPlaylist) -> MediaItem {
    let mut item = MediaItem::new(playlist.id.id().to_string(), playlist.name, MediaType::Playlist);
    item.authors = vec![
        playlist
            .owner
            .display_name
            .unwrap_or_else(|| playlist.owner.id.id().to_string()),
    ];
    item.author_ids = vec![playlist.owner.id.id().to_string()];
    item.image_url = first_image(&playlist.images);
    item
}

fn from_full_artist(artist: FullArtist) -> MediaItem {
    let mut item = MediaItem::new(artist.id.id().to_string(), artist.name, MediaType::Artist);
    item.image_url = first_image(&artist.images);
    item
}

fn from_simplified_episode(episode: SimplifiedEpisode) -> MediaItem {
    let mut item = MediaItem::new(episode.id.id().to_string(), episode.name, MediaType::Episode);
    item.image_url = first_image(&episode.images);
    item.release_date = Some(episode.release_date);
    item.duration_ms = duration_ms(episode.duration.num_milliseconds());
    item
}

fn from_full_episode(episode: FullEpisode) -> MediaItem {
    let mut item = MediaItem::new(episode.id.id().to_string(), episode.name, MediaType::Episode);
    item.authors = vec![episode.show.publisher.clone()];
    item.parent_id = Some(episode.show.id.id().to_string());
    item.image_url = first_image(&episode.images);
    item.release_date = Some(episode.release_date);
    item.duration_ms = duration_ms(episode.duration.num_milliseconds());
    item
}
