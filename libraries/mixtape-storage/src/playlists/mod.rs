use crate::users;
use mixtape_core::{
    error::{MixtapeError, Result},
    types::{Playlist, PlaylistDetails, PlaylistId, TrackId, UserId},
};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use std::collections::HashMap;

const PLAYLIST_COLUMNS: &str = "id, name, description, img, owner_id, tracks, version";

fn from_row(row: &SqliteRow) -> Result<Playlist> {
    let tracks: Vec<TrackId> = serde_json::from_str(&row.try_get::<String, _>("tracks")?)?;

    Ok(Playlist {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        desc: row.try_get("description")?,
        img: row.try_get("img")?,
        owner_id: row.try_get("owner_id")?,
        tracks,
        version: row.try_get("version")?,
    })
}

/// Get all playlists
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(&format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists ORDER BY created_at, rowid"
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(&format!("SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Resolve a list of ids, keeping the caller's order and skipping dangling ids
pub async fn get_by_ids(pool: &SqlitePool, ids: &[PlaylistId]) -> Result<Vec<Playlist>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE id IN ("
    ));
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(id.clone());
    }
    separated.push_unseparated(")");

    let rows = query.build().fetch_all(pool).await?;

    let mut by_id = rows
        .iter()
        .map(|row| from_row(row).map(|playlist| (playlist.id.clone(), playlist)))
        .collect::<Result<HashMap<_, _>>>()?;

    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

/// Random sample of at most `limit` playlists, without replacement
pub async fn get_random(pool: &SqlitePool, limit: usize) -> Result<Vec<Playlist>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let rows = sqlx::query(&format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists ORDER BY RANDOM() LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Create a playlist and record it in the owner's collection
///
/// Both writes share one transaction: either the playlist exists and the
/// owner lists it, or neither happened.
pub async fn create(
    pool: &SqlitePool,
    owner_id: &UserId,
    details: PlaylistDetails,
) -> Result<Playlist> {
    let mut tx = pool.begin().await?;

    let mut owner = users::lock_for_update(&mut *tx, owner_id).await?;
    let playlist = Playlist::new(owner_id.clone(), details);

    sqlx::query(
        r#"
        INSERT INTO playlists (id, name, description, img, owner_id, tracks, version)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&playlist.id)
    .bind(&playlist.name)
    .bind(&playlist.desc)
    .bind(&playlist.img)
    .bind(&playlist.owner_id)
    .bind(serde_json::to_string(&playlist.tracks)?)
    .bind(playlist.version)
    .execute(&mut *tx)
    .await?;

    owner.add_playlist(playlist.id.clone());
    users::write_playlists(&mut *tx, &owner).await?;

    tx.commit().await?;

    Ok(playlist)
}

/// Save name, description, image and tracks if nobody else saved the playlist since it was read
///
/// The owner column is never written after creation.
pub async fn save(pool: &SqlitePool, playlist: &Playlist) -> Result<Playlist> {
    let result = sqlx::query(
        r#"
        UPDATE playlists
        SET name = ?, description = ?, img = ?, tracks = ?, version = version + 1
        WHERE id = ? AND version = ?
        "#,
    )
    .bind(&playlist.name)
    .bind(&playlist.desc)
    .bind(&playlist.img)
    .bind(serde_json::to_string(&playlist.tracks)?)
    .bind(&playlist.id)
    .bind(playlist.version)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(match get_by_id(pool, &playlist.id).await? {
            Some(_) => MixtapeError::conflict(format!(
                "playlist {} was modified concurrently",
                playlist.id
            )),
            None => MixtapeError::not_found("Playlist", playlist.id.as_str()),
        });
    }

    let mut saved = playlist.clone();
    saved.version += 1;
    Ok(saved)
}

/// Delete a playlist and remove it from its owner's collection in one transaction
pub async fn delete(pool: &SqlitePool, playlist: &Playlist) -> Result<()> {
    let mut tx = pool.begin().await?;

    let mut owner = users::lock_for_update(&mut *tx, &playlist.owner_id).await?;

    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(&playlist.id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MixtapeError::not_found("Playlist", playlist.id.as_str()));
    }

    owner.remove_playlist(&playlist.id);
    users::write_playlists(&mut *tx, &owner).await?;

    tx.commit().await?;

    Ok(())
}
