//! Section bookkeeping for Spotify catalog detail screens.
//!
//! A detail screen (artist, album, playlist, show, episode) is split into
//! sections. Each section's raw result batches are deduplicated, bounded or
//! appended, and stored together with a loading flag and a loaded count.

pub mod config;
pub mod controller;
pub mod logging;
pub mod model;

pub use config::DetailConfig;
pub use controller::DetailController;
