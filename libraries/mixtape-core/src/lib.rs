//! Mixtape Core
//!
//! Storage-agnostic domain types, membership rules, and error handling for Mixtape.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `User` and their identifiers
//! - **Membership Rules**: idempotent track insertion, liked-track toggling,
//!   and the playlist ownership check
//! - **Storage Trait**: `StorageContext`, the document store every service talks to
//! - **Error Handling**: Unified `MixtapeError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use mixtape_core::types::{Playlist, PlaylistDetails, TrackId, UserId};
//!
//! let owner = UserId::generate();
//! let mut playlist = Playlist::new(owner.clone(), PlaylistDetails::named("Road Trip"));
//!
//! let track = TrackId::generate();
//! assert!(playlist.add_track(track.clone()));
//! assert!(!playlist.add_track(track));
//! assert!(playlist.check_owner(&owner).is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{MixtapeError, Result};
pub use storage::StorageContext;

pub use types::{
    CreateTrack, CreateUser, Playlist, PlaylistDetails, PlaylistId, PlaylistWithTracks, Track,
    TrackId, UpdateTrack, User, UserId,
};
