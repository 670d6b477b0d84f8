//! Domain types: users, tracks, playlists and their identifiers

mod ids;
mod playlist;
mod track;
mod user;

pub use ids::{PlaylistId, TrackId, UserId};
pub use playlist::{Playlist, PlaylistDetails, PlaylistWithTracks};
pub use track::{CreateTrack, Track, UpdateTrack};
pub use user::{CreateUser, User};
