/// Playlist service - ownership and membership rules over the store
use crate::error::Result;
use mixtape_core::{
    storage::StorageContext,
    types::{Playlist, PlaylistDetails, PlaylistId, PlaylistWithTracks, TrackId, UserId},
};
use std::sync::Arc;

/// Number of playlists returned by `list_random` from the HTTP surface
pub const RANDOM_SAMPLE_SIZE: usize = 10;

#[derive(Clone)]
pub struct PlaylistService {
    storage: Arc<dyn StorageContext>,
}

impl PlaylistService {
    pub fn new(storage: Arc<dyn StorageContext>) -> Self {
        Self { storage }
    }

    /// Create a playlist owned by `owner_id` and record it on the owner
    pub async fn create(&self, owner_id: &UserId, details: PlaylistDetails) -> Result<Playlist> {
        let playlist = self.storage.create_playlist(owner_id, details).await?;
        tracing::info!(playlist_id = %playlist.id, owner_id = %owner_id, "Playlist created");
        Ok(playlist)
    }

    /// Overwrite name, description and image
    pub async fn edit(
        &self,
        playlist_id: &PlaylistId,
        requester: &UserId,
        details: PlaylistDetails,
    ) -> Result<Playlist> {
        let mut playlist = self.owned_playlist(playlist_id, requester).await?;
        playlist.apply_details(details);
        let playlist = self.storage.save_playlist(&playlist).await?;
        tracing::info!(playlist_id = %playlist_id, "Playlist updated");
        Ok(playlist)
    }

    /// Append a track unless it is already in the playlist
    pub async fn add_track(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
        requester: &UserId,
    ) -> Result<Playlist> {
        let mut playlist = self.owned_playlist(playlist_id, requester).await?;
        if !playlist.add_track(track_id.clone()) {
            return Ok(playlist);
        }
        let playlist = self.storage.save_playlist(&playlist).await?;
        tracing::info!(playlist_id = %playlist_id, track_id = %track_id, "Track added to playlist");
        Ok(playlist)
    }

    /// Remove a track. Tracks not in the playlist are ignored.
    pub async fn remove_track(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
        requester: &UserId,
    ) -> Result<Playlist> {
        let mut playlist = self.owned_playlist(playlist_id, requester).await?;
        if !playlist.remove_track(track_id) {
            tracing::debug!(playlist_id = %playlist_id, track_id = %track_id, "Track not in playlist");
            return Ok(playlist);
        }
        let playlist = self.storage.save_playlist(&playlist).await?;
        tracing::info!(playlist_id = %playlist_id, track_id = %track_id, "Track removed from playlist");
        Ok(playlist)
    }

    /// Delete a playlist and drop it from its owner's collection
    pub async fn delete(&self, playlist_id: &PlaylistId, requester: &UserId) -> Result<()> {
        let playlist = self.owned_playlist(playlist_id, requester).await?;
        self.storage.delete_playlist(&playlist).await?;
        tracing::info!(playlist_id = %playlist_id, "Playlist deleted");
        Ok(())
    }

    /// Playlist plus its resolved tracks, in playlist order
    pub async fn get_with_tracks(&self, playlist_id: &PlaylistId) -> Result<PlaylistWithTracks> {
        let playlist = self.storage.require_playlist(playlist_id).await?;
        let tracks = self.storage.get_tracks_by_ids(&playlist.tracks).await?;
        Ok(PlaylistWithTracks { playlist, tracks })
    }

    /// Playlists in the user's collection
    pub async fn list_favourites(&self, user_id: &UserId) -> Result<Vec<Playlist>> {
        let user = self.storage.require_user(user_id).await?;
        Ok(self.storage.get_playlists_by_ids(&user.playlists).await?)
    }

    /// Random sample of at most `count` playlists
    pub async fn list_random(&self, count: usize) -> Result<Vec<Playlist>> {
        Ok(self.storage.get_random_playlists(count).await?)
    }

    pub async fn list_all(&self) -> Result<Vec<Playlist>> {
        Ok(self.storage.get_all_playlists().await?)
    }

    /// Load a playlist and run the ownership check every mutation goes through
    async fn owned_playlist(&self, playlist_id: &PlaylistId, requester: &UserId) -> Result<Playlist> {
        let playlist = self.storage.require_playlist(playlist_id).await?;
        if let Err(e) = playlist.check_owner(requester) {
            tracing::warn!(playlist_id = %playlist_id, requester = %requester, "Ownership check failed");
            return Err(e.into());
        }
        Ok(playlist)
    }
}
