//! Opening detail screens

use anyhow::{Result, bail};
use futures::future::join_all;

use super::DetailController;
use crate::model::{DetailScreenOrigin, FollowState, FollowTarget, MediaItem, MediaSource, ScreenKind};

impl<S: MediaSource> DetailController<S> {
    /// Replaces whatever screen was open with the detail screen of `item`
    /// and loads its first pages.
    pub async fn open(&self, item: MediaItem, origin: DetailScreenOrigin) -> Result<()> {
        let Some(screen) = item.media_type.screen() else {
            bail!("{:?} items have no detail screen", item.media_type);
        };

        tracing::info!(item_id = %item.id, title = %item.title, ?screen, ?origin, "Opening detail screen");

        self.model.open_session(item, origin).await;
        self.load_screen_data(screen).await;
        Ok(())
    }

    /// Runs the follow check and the first load of every section of `screen`
    /// concurrently.
    pub async fn load_screen_data(&self, screen: ScreenKind) {
        let loads = join_all(screen.sections().iter().map(|&section| self.load_section(section)));
        futures::join!(loads, self.check_screen_follow(screen));
    }

    async fn check_screen_follow(&self, screen: ScreenKind) {
        let Some((generation, main_item)) = self.model.session().await else {
            return;
        };

        let check = match screen {
            ScreenKind::Artist => Some((FollowTarget::Artist, main_item.id)),
            ScreenKind::Album => Some((FollowTarget::Album, main_item.id)),
            ScreenKind::Show => Some((FollowTarget::Show, main_item.id)),
            ScreenKind::Episode => main_item.parent_id.map(|show_id| (FollowTarget::Show, show_id)),
            ScreenKind::Playlist => self
                .current_user_id
                .clone()
                .map(|user_id| (FollowTarget::Playlist { user_id }, main_item.id)),
        };

        match check {
            Some((target, item_id)) => {
                let state = self.follow_state_of(&target, &item_id).await;
                if !self.model.set_follow_state_in(generation, &item_id, state).await {
                    tracing::debug!(item_id = %item_id, "Screen changed during follow check, dropping result");
                }
            }
            None => tracing::debug!(?screen, "Follow check skipped"),
        }
    }

    /// Records whether the user follows `item_id`; a failed check is stored
    /// as `FollowState::Error`.
    pub async fn check_follow(&self, target: &FollowTarget, item_id: &str) {
        let state = self.follow_state_of(target, item_id).await;
        self.model.set_follow_state(item_id, state).await;
    }

    async fn follow_state_of(&self, target: &FollowTarget, item_id: &str) -> FollowState {
        match self.source.check_follows(target, item_id).await {
            Ok(following) => FollowState::from(following),
            Err(e) => {
                tracing::warn!(item_id, error = %e, "Follow check failed");
                FollowState::Error
            }
        }
    }
}
