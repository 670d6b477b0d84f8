//! Playlist types and membership rules

use super::ids::{PlaylistId, TrackId, UserId};
use super::track::Track;
use crate::error::{MixtapeError, Result};
use serde::{Deserialize, Serialize};

/// User-owned, ordered collection of tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,
    /// Display name, never blank
    pub name: String,
    /// Free-form description, may be blank
    pub desc: String,
    /// Cover image reference, may be blank
    pub img: String,

    /// Set at creation, never reassigned
    pub owner_id: UserId,

    /// Track ids in play order, each at most once
    pub tracks: Vec<TrackId>,

    /// Bumped by the store on every successful save
    pub version: i64,
}

/// Editable playlist fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDetails {
    /// Display name
    pub name: String,
    /// Description
    pub desc: String,
    /// Cover image reference
    pub img: String,
}

impl PlaylistDetails {
    /// Details with only a name, description and image left blank
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Playlist together with its resolved track records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistWithTracks {
    /// The playlist document
    pub playlist: Playlist,
    /// Existing tracks in playlist order; deleted tracks are skipped
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Create an empty playlist owned by `owner_id`
    pub fn new(owner_id: UserId, details: PlaylistDetails) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: details.name,
            desc: details.desc,
            img: details.img,
            owner_id,
            tracks: Vec::new(),
            version: 0,
        }
    }

    /// Ownership capability check shared by every mutating operation
    pub fn check_owner(&self, requester: &UserId) -> Result<()> {
        if self.owner_id == *requester {
            Ok(())
        } else {
            Err(MixtapeError::permission_denied(format!(
                "user {} does not own playlist {}",
                requester, self.id
            )))
        }
    }

    /// Overwrite name, description and image
    pub fn apply_details(&mut self, details: PlaylistDetails) {
        self.name = details.name;
        self.desc = details.desc;
        self.img = details.img;
    }

    /// Append `track_id` unless already present. Returns whether the sequence changed.
    pub fn add_track(&mut self, track_id: TrackId) -> bool {
        if self.tracks.contains(&track_id) {
            return false;
        }
        self.tracks.push(track_id);
        true
    }

    /// Remove the first occurrence of `track_id`. Absent ids leave the sequence untouched.
    pub fn remove_track(&mut self, track_id: &TrackId) -> bool {
        match self.tracks.iter().position(|id| id == track_id) {
            Some(index) => {
                self.tracks.remove(index);
                true
            }
            None => false,
        }
    }
}
