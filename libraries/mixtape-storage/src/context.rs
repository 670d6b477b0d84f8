use crate::{playlists, tracks, users};
use async_trait::async_trait;
use mixtape_core::{error::Result, storage::StorageContext, types::*};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StorageContext for LocalStorageContext {
    // Users
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        users::create(&self.pool, user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>> {
        users::find_by_name(&self.pool, name).await
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    async fn save_user(&self, user: &User) -> Result<User> {
        users::save(&self.pool, user).await
    }

    async fn get_password_hash(&self, id: &UserId) -> Result<Option<String>> {
        users::get_password_hash(&self.pool, id).await
    }

    async fn set_password_hash(&self, id: &UserId, password_hash: &str) -> Result<()> {
        users::set_password_hash(&self.pool, id, password_hash).await
    }

    // Tracks
    async fn get_all_tracks(&self) -> Result<Vec<Track>> {
        tracks::get_all(&self.pool).await
    }

    async fn get_track(&self, id: &TrackId) -> Result<Option<Track>> {
        tracks::get_by_id(&self.pool, id).await
    }

    async fn get_tracks_by_ids(&self, ids: &[TrackId]) -> Result<Vec<Track>> {
        tracks::get_by_ids(&self.pool, ids).await
    }

    async fn create_track(&self, track: CreateTrack) -> Result<Track> {
        tracks::create(&self.pool, track).await
    }

    async fn update_track(&self, id: &TrackId, update: UpdateTrack) -> Result<Option<Track>> {
        tracks::update(&self.pool, id, update).await
    }

    async fn delete_track(&self, id: &TrackId) -> Result<bool> {
        tracks::delete(&self.pool, id).await
    }

    // Playlists
    async fn get_all_playlists(&self) -> Result<Vec<Playlist>> {
        playlists::get_all(&self.pool).await
    }

    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn get_playlists_by_ids(&self, ids: &[PlaylistId]) -> Result<Vec<Playlist>> {
        playlists::get_by_ids(&self.pool, ids).await
    }

    async fn get_random_playlists(&self, limit: usize) -> Result<Vec<Playlist>> {
        playlists::get_random(&self.pool, limit).await
    }

    async fn create_playlist(
        &self,
        owner_id: &UserId,
        details: PlaylistDetails,
    ) -> Result<Playlist> {
        playlists::create(&self.pool, owner_id, details).await
    }

    async fn save_playlist(&self, playlist: &Playlist) -> Result<Playlist> {
        playlists::save(&self.pool, playlist).await
    }

    async fn delete_playlist(&self, playlist: &Playlist) -> Result<()> {
        playlists::delete(&self.pool, playlist).await
    }
}
