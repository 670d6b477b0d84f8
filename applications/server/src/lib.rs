//! Mixtape Server Library
//!
//! Playlist and track catalog backend with JWT authentication, per-playlist
//! ownership and per-user likes.
//!
//! This library exposes the core components for the binary and for testing.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::router as create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AuthService, PlaylistService, TrackService};
pub use state::AppState;
