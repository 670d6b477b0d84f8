/// Playlists API routes
use crate::{
    error::Result,
    middleware::{
        validation::{required, required_id},
        AuthenticatedUser, Validate, ValidId, ValidatedJson,
    },
    services::playlists::RANDOM_SAMPLE_SIZE,
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use mixtape_core::types::{PlaylistDetails, PlaylistId, TrackId};
use serde::Deserialize;
use serde_json::{json, Value};

/// Body of create and edit: `name` required, `desc`/`img` optional and may be blank
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaylistPayload {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub img: Option<String>,
}

impl Validate for PlaylistPayload {
    type Output = PlaylistDetails;

    fn validate(self) -> std::result::Result<PlaylistDetails, String> {
        Ok(PlaylistDetails {
            name: required("name", self.name)?,
            desc: self.desc.unwrap_or_default(),
            img: self.img.unwrap_or_default(),
        })
    }
}

/// Body of add-song and remove-song
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct TrackRefPayload {
    pub playlist_id: Option<String>,
    pub track_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TrackRef {
    pub playlist_id: PlaylistId,
    pub track_id: TrackId,
}

impl Validate for TrackRefPayload {
    type Output = TrackRef;

    fn validate(self) -> std::result::Result<TrackRef, String> {
        Ok(TrackRef {
            playlist_id: required_id("playlistId", self.playlist_id)?,
            track_id: required_id("trackId", self.track_id)?,
        })
    }
}

/// POST /api/playlists
/// Create a playlist owned by the caller
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ValidatedJson(details): ValidatedJson<PlaylistPayload>,
) -> Result<(StatusCode, Json<Value>)> {
    let playlist = app_state
        .playlists
        .create(auth.user_id(), details)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": playlist }))))
}

/// PUT /api/playlists/edit/:id
/// Overwrite name, description and image (owner only)
pub async fn edit_playlist(
    ValidId(playlist_id): ValidId<PlaylistId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ValidatedJson(details): ValidatedJson<PlaylistPayload>,
) -> Result<Json<Value>> {
    app_state
        .playlists
        .edit(&playlist_id, auth.user_id(), details)
        .await?;
    Ok(Json(json!({ "message": "playlist updated successfully" })))
}

/// PUT /api/playlists/add-song
/// Add a track to a playlist (owner only, idempotent)
pub async fn add_track_to_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ValidatedJson(track_ref): ValidatedJson<TrackRefPayload>,
) -> Result<Json<Value>> {
    app_state
        .playlists
        .add_track(&track_ref.playlist_id, &track_ref.track_id, auth.user_id())
        .await?;
    Ok(Json(json!({ "message": "Track added to playlist successfully" })))
}

/// PUT /api/playlists/remove-song
/// Remove a track from a playlist (owner only, absent tracks are ignored)
pub async fn remove_track_from_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ValidatedJson(track_ref): ValidatedJson<TrackRefPayload>,
) -> Result<Json<Value>> {
    app_state
        .playlists
        .remove_track(&track_ref.playlist_id, &track_ref.track_id, auth.user_id())
        .await?;
    Ok(Json(json!({ "message": "Track removed from playlist successfully" })))
}

/// GET /api/playlists/favourite
/// Playlists in the caller's collection
pub async fn favourite_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlists = app_state.playlists.list_favourites(auth.user_id()).await?;
    Ok(Json(json!({ "data": playlists })))
}

/// GET /api/playlists/random
pub async fn random_playlists(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlists = app_state.playlists.list_random(RANDOM_SAMPLE_SIZE).await?;
    Ok(Json(json!({ "data": playlists })))
}

/// GET /api/playlists/:id
/// Playlist details with resolved tracks
pub async fn get_playlist(
    ValidId(playlist_id): ValidId<PlaylistId>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlist = app_state.playlists.get_with_tracks(&playlist_id).await?;
    Ok(Json(json!({ "data": playlist })))
}

/// GET /api/playlists
pub async fn list_playlists(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlists = app_state.playlists.list_all().await?;
    Ok(Json(json!({ "data": playlists })))
}

/// DELETE /api/playlists/:id
/// Delete a playlist (owner only)
pub async fn delete_playlist(
    ValidId(playlist_id): ValidId<PlaylistId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    app_state
        .playlists
        .delete(&playlist_id, auth.user_id())
        .await?;
    Ok(Json(json!({ "message": "playlist removed successfully" })))
}
