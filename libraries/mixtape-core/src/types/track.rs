//! Track catalog types

use super::ids::TrackId;
use serde::{Deserialize, Serialize};

/// Catalog entry managed by admins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,
    /// Track title
    pub name: String,
    /// Performing artist
    pub artist: String,
    /// Album the track appears on
    pub album: String,
    /// Cover image reference (usually a URL)
    pub img: String,
    /// Display duration, e.g. "3:30"
    pub duration: String,
}

/// Data for creating a new track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTrack {
    /// Track title
    pub name: String,
    /// Performing artist
    pub artist: String,
    /// Album the track appears on
    pub album: String,
    /// Cover image reference
    pub img: String,
    /// Display duration
    pub duration: String,
}

/// Fields to overwrite on an existing track. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTrack {
    /// New title
    pub name: Option<String>,
    /// New artist
    pub artist: Option<String>,
    /// New album
    pub album: Option<String>,
    /// New cover image reference
    pub img: Option<String>,
    /// New display duration
    pub duration: Option<String>,
}

impl UpdateTrack {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.img.is_none()
            && self.duration.is_none()
    }
}

impl Track {
    /// Create a track with a freshly generated identifier
    pub fn new(data: CreateTrack) -> Self {
        Self {
            id: TrackId::generate(),
            name: data.name,
            artist: data.artist,
            album: data.album,
            img: data.img,
            duration: data.duration,
        }
    }
}
