//! Storage trait for the Mixtape document store

use crate::error::{MixtapeError, Result};
use crate::types::{
    CreateTrack, CreateUser, Playlist, PlaylistDetails, PlaylistId, Track, TrackId, UpdateTrack,
    User, UserId,
};
use async_trait::async_trait;

/// Document store holding users, tracks and playlists
///
/// Services receive the store as `Arc<dyn StorageContext>`. Versioned
/// documents (`User`, `Playlist`) are saved with a compare-and-swap on their
/// `version` field: a save whose version no longer matches the stored record
/// fails with [`MixtapeError::Conflict`].
#[async_trait]
pub trait StorageContext: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Create a new user with empty playlist and liked-track collections
    async fn create_user(&self, user: CreateUser) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Find user by exact name
    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>>;

    /// Get all users (admin/CLI use)
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// Persist a modified user, returning it with its new version
    async fn save_user(&self, user: &User) -> Result<User>;

    /// Get the stored password hash, if the user has credentials
    async fn get_password_hash(&self, id: &UserId) -> Result<Option<String>>;

    /// Create or replace the user's password hash
    async fn set_password_hash(&self, id: &UserId, password_hash: &str) -> Result<()>;

    // ========================================================================
    // Tracks
    // ========================================================================

    /// Get all tracks
    async fn get_all_tracks(&self) -> Result<Vec<Track>>;

    /// Get track by ID
    async fn get_track(&self, id: &TrackId) -> Result<Option<Track>>;

    /// Resolve ids to tracks in the given order, skipping ids with no record
    async fn get_tracks_by_ids(&self, ids: &[TrackId]) -> Result<Vec<Track>>;

    /// Create a new track
    async fn create_track(&self, track: CreateTrack) -> Result<Track>;

    /// Overwrite the supplied fields. `None` when the track does not exist.
    async fn update_track(&self, id: &TrackId, update: UpdateTrack) -> Result<Option<Track>>;

    /// Delete a track. Returns false when nothing was deleted.
    async fn delete_track(&self, id: &TrackId) -> Result<bool>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Get all playlists
    async fn get_all_playlists(&self) -> Result<Vec<Playlist>>;

    /// Get playlist by ID
    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    /// Resolve ids to playlists in the given order, skipping ids with no record
    async fn get_playlists_by_ids(&self, ids: &[PlaylistId]) -> Result<Vec<Playlist>>;

    /// Uniform sample of at most `limit` playlists, without replacement
    async fn get_random_playlists(&self, limit: usize) -> Result<Vec<Playlist>>;

    /// Insert a playlist and append it to the owner's collection atomically
    async fn create_playlist(&self, owner_id: &UserId, details: PlaylistDetails)
        -> Result<Playlist>;

    /// Persist a modified playlist, returning it with its new version
    async fn save_playlist(&self, playlist: &Playlist) -> Result<Playlist>;

    /// Delete a playlist and drop it from the owner's collection atomically
    async fn delete_playlist(&self, playlist: &Playlist) -> Result<()>;

    // ========================================================================
    // Convenience
    // ========================================================================

    /// Like `get_user` but absent users are an error
    async fn require_user(&self, id: &UserId) -> Result<User> {
        self.get_user(id)
            .await?
            .ok_or_else(|| MixtapeError::not_found("User", id.as_str()))
    }

    /// Like `get_playlist` but absent playlists are an error
    async fn require_playlist(&self, id: &PlaylistId) -> Result<Playlist> {
        self.get_playlist(id)
            .await?
            .ok_or_else(|| MixtapeError::not_found("Playlist", id.as_str()))
    }
}
