use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rspotify::{AuthCodeSpotify, Config, Token};

use spotify_detail::DetailConfig;
use spotify_detail::controller::DetailController;
use spotify_detail::logging;
use spotify_detail::model::{DetailModel, DetailScreenOrigin, MediaItem, MediaType, SpotifyClient};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ItemKind {
    Artist,
    Album,
    Playlist,
    Show,
    Episode,
}

impl From<ItemKind> for MediaType {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Artist => MediaType::Artist,
            ItemKind::Album => MediaType::Album,
            ItemKind::Playlist => MediaType::Playlist,
            ItemKind::Show => MediaType::Show,
            ItemKind::Episode => MediaType::Episode,
        }
    }
}

/// Open a Spotify detail screen and print its reconciled sections
#[derive(Debug, Parser)]
#[command(name = "spotify-detail", version)]
struct Cli {
    /// JSON config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// OAuth access token
    #[arg(long, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    /// Current user id, enables the playlist follow check
    #[arg(long)]
    user_id: Option<String>,

    /// Display title of the item; artist playlists are searched by it
    #[arg(long, default_value = "")]
    title: String,

    /// Pages to load for paginated sections
    #[arg(long, default_value_t = 1)]
    pages: usize,

    #[arg(value_enum)]
    kind: ItemKind,

    id: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DetailConfig::load_or_default(cli.config.as_deref())?;

    let _log_guard = match logging::init_logging(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== spotify-detail starting ===");

    let rspotify_client = setup_rspotify(&cli.token).await?;
    let source = SpotifyClient::new(rspotify_client, config.market_from_token);

    let mut controller = DetailController::new(DetailModel::new(), source, config);
    if let Some(user_id) = &cli.user_id {
        controller = controller.with_current_user(user_id.clone());
    }

    let item = MediaItem::new(cli.id.clone(), cli.title.clone(), cli.kind.into());
    let Some(screen) = item.media_type.screen() else {
        anyhow::bail!("no detail screen for {:?}", cli.kind);
    };

    controller.open(item.clone(), DetailScreenOrigin::Search).await?;

    for _ in 1..cli.pages {
        let mut loaded_any = false;
        for &section in screen.sections().iter().filter(|s| s.is_paginated()) {
            let items = controller.model().items(section).await?;
            if items.len() < 4 {
                continue;
            }
            let candidate = &items[items.len() - 4];
            loaded_any |= controller.load_more_if_needed(section, candidate).await;
        }
        if !loaded_any {
            break;
        }
    }

    print_screen(&controller, &item).await?;

    tracing::info!("spotify-detail shutting down");
    Ok(())
}

async fn setup_rspotify(access_token: &str) -> Result<AuthCodeSpotify> {
    let spotify = AuthCodeSpotify::with_config(
        Default::default(),
        Default::default(),
        Config {
            token_cached: false,
            token_refreshing: false,
            ..Default::default()
        },
    );

    let token = Token {
        access_token: access_token.to_string(),
        ..Default::default()
    };

    *spotify
        .token
        .lock()
        .await
        .map_err(|_| anyhow::anyhow!("rspotify token lock poisoned"))? = Some(token);
    tracing::debug!("rspotify token set");
    Ok(spotify)
}

async fn print_screen(controller: &DetailController<SpotifyClient>, item: &MediaItem) -> Result<()> {
    let model = controller.model();

    if let Some(state) = model.follow_state(&item.id).await {
        println!("{} ({:?})", item.uri(), state);
    } else {
        println!("{}", item.uri());
    }

    let Some(screen) = item.media_type.screen() else {
        return Ok(());
    };

    for &section in screen.sections() {
        let state = model.section_state(section).await?;
        let status = if state.loading { ", loading" } else { "" };
        println!();
        println!("== {} ({} items, {} requested{})", section, state.items.len(), state.loaded_count, status);

        for (index, entry) in state.items.iter().enumerate() {
            if entry.authors.is_empty() {
                println!("{:>4}. {}", index + 1, entry.title);
            } else {
                println!("{:>4}. {} - {}", index + 1, entry.title, entry.authors.join(", "));
            }
        }
    }

    Ok(())
}
