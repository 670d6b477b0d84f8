/// Shared application state
use crate::services::{AuthService, PlaylistService, TrackService};
use axum::extract::FromRef;
use mixtape_core::StorageContext;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn StorageContext>,
    pub auth_service: Arc<AuthService>,
    pub playlists: PlaylistService,
    pub tracks: TrackService,
}

impl AppState {
    pub fn new(db: Arc<dyn StorageContext>, auth_service: Arc<AuthService>) -> Self {
        Self {
            playlists: PlaylistService::new(Arc::clone(&db)),
            tracks: TrackService::new(Arc::clone(&db)),
            db,
            auth_service,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.auth_service)
    }
}
