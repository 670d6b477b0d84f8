/// Track service - catalog management and likes
use crate::error::{Result, ServerError};
use mixtape_core::{
    storage::StorageContext,
    types::{CreateTrack, Track, TrackId, UpdateTrack, UserId},
};
use std::sync::Arc;

/// Result of toggling a like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked,
    Unliked,
}

impl LikeOutcome {
    pub fn message(self) -> &'static str {
        match self {
            LikeOutcome::Liked => "track liked successfully",
            LikeOutcome::Unliked => "track unliked successfully",
        }
    }
}

#[derive(Clone)]
pub struct TrackService {
    storage: Arc<dyn StorageContext>,
}

impl TrackService {
    pub fn new(storage: Arc<dyn StorageContext>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, track: CreateTrack) -> Result<Track> {
        let track = self.storage.create_track(track).await?;
        tracing::info!(track_id = %track.id, "Track created");
        Ok(track)
    }

    /// Overwrite the supplied fields of a track
    pub async fn update(&self, track_id: &TrackId, update: UpdateTrack) -> Result<Track> {
        let track = self
            .storage
            .update_track(track_id, update)
            .await?
            .ok_or_else(|| ServerError::NotFound("track not found".to_string()))?;
        tracing::info!(track_id = %track_id, "Track updated");
        Ok(track)
    }

    /// Delete a track. Playlists keep referencing its id.
    pub async fn delete(&self, track_id: &TrackId) -> Result<()> {
        if !self.storage.delete_track(track_id).await? {
            return Err(ServerError::NotFound("track not found".to_string()));
        }
        tracing::info!(track_id = %track_id, "Track deleted");
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<Track>> {
        Ok(self.storage.get_all_tracks().await?)
    }

    /// Like the track if the user does not like it yet, unlike it otherwise
    pub async fn toggle_like(&self, track_id: &TrackId, user_id: &UserId) -> Result<LikeOutcome> {
        if self.storage.get_track(track_id).await?.is_none() {
            return Err(ServerError::BadRequest("track not found".to_string()));
        }

        let mut user = self.storage.require_user(user_id).await?;
        let outcome = if user.toggle_liked_track(track_id.clone()) {
            LikeOutcome::Liked
        } else {
            LikeOutcome::Unliked
        };
        self.storage.save_user(&user).await?;

        tracing::info!(track_id = %track_id, user_id = %user_id, ?outcome, "Like toggled");
        Ok(outcome)
    }

    /// Full records of the user's liked tracks
    pub async fn list_liked(&self, user_id: &UserId) -> Result<Vec<Track>> {
        let user = self.storage.require_user(user_id).await?;
        Ok(self.storage.get_tracks_by_ids(&user.liked_tracks).await?)
    }
}
