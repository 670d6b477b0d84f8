use mixtape_core::{
    error::Result,
    types::{CreateTrack, Track, TrackId, UpdateTrack},
};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use std::collections::HashMap;

fn from_row(row: &SqliteRow) -> Result<Track> {
    Ok(Track {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        artist: row.try_get("artist")?,
        album: row.try_get("album")?,
        img: row.try_get("img")?,
        duration: row.try_get("duration")?,
    })
}

/// Get all tracks
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Track>> {
    let rows = sqlx::query(
        "SELECT id, name, artist, album, img, duration FROM tracks ORDER BY created_at, rowid",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Get track by ID
pub async fn get_by_id(pool: &SqlitePool, id: &TrackId) -> Result<Option<Track>> {
    let row = sqlx::query("SELECT id, name, artist, album, img, duration FROM tracks WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Resolve a list of ids, keeping the caller's order and skipping dangling ids
pub async fn get_by_ids(pool: &SqlitePool, ids: &[TrackId]) -> Result<Vec<Track>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id, name, artist, album, img, duration FROM tracks WHERE id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(id.clone());
    }
    separated.push_unseparated(")");

    let rows = query.build().fetch_all(pool).await?;

    let mut by_id = rows
        .iter()
        .map(|row| from_row(row).map(|track| (track.id.clone(), track)))
        .collect::<Result<HashMap<_, _>>>()?;

    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

/// Create new track
pub async fn create(pool: &SqlitePool, track: CreateTrack) -> Result<Track> {
    let track = Track::new(track);

    sqlx::query(
        r#"
        INSERT INTO tracks (id, name, artist, album, img, duration)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&track.id)
    .bind(&track.name)
    .bind(&track.artist)
    .bind(&track.album)
    .bind(&track.img)
    .bind(&track.duration)
    .execute(pool)
    .await?;

    Ok(track)
}

/// Overwrite the supplied fields of a track
pub async fn update(pool: &SqlitePool, id: &TrackId, update: UpdateTrack) -> Result<Option<Track>> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE tracks
        SET name = COALESCE(?, name),
            artist = COALESCE(?, artist),
            album = COALESCE(?, album),
            img = COALESCE(?, img),
            duration = COALESCE(?, duration)
        WHERE id = ?
        "#,
    )
    .bind(update.name)
    .bind(update.artist)
    .bind(update.album)
    .bind(update.img)
    .bind(update.duration)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let row = sqlx::query("SELECT id, name, artist, album, img, duration FROM tracks WHERE id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    let track = from_row(&row)?;

    tx.commit().await?;

    Ok(Some(track))
}

/// Delete track. Playlists referencing it keep the dangling id.
pub async fn delete(pool: &SqlitePool, id: &TrackId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
