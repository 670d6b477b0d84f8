//! User domain type
use super::ids::{PlaylistId, TrackId, UserId};
use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login and display name
    pub name: String,

    /// Admins manage the track catalog
    pub is_admin: bool,

    /// Owned playlists in creation order
    pub playlists: Vec<PlaylistId>,

    /// Liked tracks, each at most once
    pub liked_tracks: Vec<TrackId>,

    /// Account creation timestamp (ISO string)
    pub created_at: String,

    /// Bumped by the store on every successful save
    pub version: i64,
}

/// Data for creating a new user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login and display name, unique across users
    pub name: String,
    /// Grant catalog administration rights
    pub is_admin: bool,
}

impl User {
    /// Record a newly created playlist
    pub fn add_playlist(&mut self, playlist_id: PlaylistId) {
        if !self.playlists.contains(&playlist_id) {
            self.playlists.push(playlist_id);
        }
    }

    /// Forget a deleted playlist
    pub fn remove_playlist(&mut self, playlist_id: &PlaylistId) -> bool {
        let before = self.playlists.len();
        self.playlists.retain(|id| id != playlist_id);
        before != self.playlists.len()
    }

    /// Flip membership of `track_id` in the liked set. Returns true if the track is now liked.
    pub fn toggle_liked_track(&mut self, track_id: TrackId) -> bool {
        if let Some(index) = self.liked_tracks.iter().position(|id| *id == track_id) {
            self.liked_tracks.remove(index);
            false
        } else {
            self.liked_tracks.push(track_id);
            true
        }
    }

    /// Whether `track_id` is in the liked set
    pub fn likes(&self, track_id: &TrackId) -> bool {
        self.liked_tracks.contains(track_id)
    }
}
