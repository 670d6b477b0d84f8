/// Tracks API routes
use crate::{
    error::Result,
    middleware::{
        validation::{non_empty, required},
        AdminUser, AuthenticatedUser, Validate, ValidId, ValidatedJson,
    },
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use mixtape_core::types::{CreateTrack, TrackId, UpdateTrack};
use serde::Deserialize;
use serde_json::{json, Value};

/// Body of track creation: every field required
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTrackPayload {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub img: Option<String>,
    pub duration: Option<String>,
}

impl Validate for CreateTrackPayload {
    type Output = CreateTrack;

    fn validate(self) -> std::result::Result<CreateTrack, String> {
        Ok(CreateTrack {
            name: required("name", self.name)?,
            artist: required("artist", self.artist)?,
            album: required("album", self.album)?,
            img: required("img", self.img)?,
            duration: required("duration", self.duration)?,
        })
    }
}

/// Body of track update: any subset of fields, none of them blank
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTrackPayload {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub img: Option<String>,
    pub duration: Option<String>,
}

impl Validate for UpdateTrackPayload {
    type Output = UpdateTrack;

    fn validate(self) -> std::result::Result<UpdateTrack, String> {
        let check = |field: &str, value: Option<String>| value.map(|v| non_empty(field, v)).transpose();

        Ok(UpdateTrack {
            name: check("name", self.name)?,
            artist: check("artist", self.artist)?,
            album: check("album", self.album)?,
            img: check("img", self.img)?,
            duration: check("duration", self.duration)?,
        })
    }
}

/// POST /api/tracks
/// Create a track (admin only)
pub async fn create_track(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(track): ValidatedJson<CreateTrackPayload>,
) -> Result<(StatusCode, Json<Value>)> {
    let track = app_state.tracks.create(track).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "data": track, "message": "track created successfully" })),
    ))
}

/// GET /api/tracks
/// Public catalog listing
pub async fn list_tracks(State(app_state): State<AppState>) -> Result<Json<Value>> {
    let tracks = app_state.tracks.list_all().await?;
    Ok(Json(json!({ "data": tracks })))
}

/// PUT /api/tracks/:id
/// Overwrite the supplied fields (admin only)
pub async fn update_track(
    ValidId(track_id): ValidId<TrackId>,
    State(app_state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(update): ValidatedJson<UpdateTrackPayload>,
) -> Result<Json<Value>> {
    let track = app_state.tracks.update(&track_id, update).await?;
    Ok(Json(
        json!({ "data": track, "message": "track updated successfully" }),
    ))
}

/// DELETE /api/tracks/:id
/// Delete a track (admin only)
pub async fn delete_track(
    ValidId(track_id): ValidId<TrackId>,
    State(app_state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Value>> {
    app_state.tracks.delete(&track_id).await?;
    Ok(Json(json!({ "message": "track deleted successfully" })))
}

/// PUT /api/tracks/like/:id
/// Toggle the caller's like on a track
pub async fn like_track(
    ValidId(track_id): ValidId<TrackId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let outcome = app_state
        .tracks
        .toggle_like(&track_id, auth.user_id())
        .await?;
    Ok(Json(json!({ "message": outcome.message() })))
}

/// GET /api/tracks/like
/// The caller's liked tracks
pub async fn liked_tracks(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let tracks = app_state.tracks.list_liked(auth.user_id()).await?;
    Ok(Json(json!({ "data": tracks })))
}
