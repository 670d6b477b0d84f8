/// Server services
pub mod auth;
pub mod playlists;
pub mod tracks;

pub use auth::AuthService;
pub use playlists::PlaylistService;
pub use tracks::{LikeOutcome, TrackService};
