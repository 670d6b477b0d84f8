//! User documents and credentials

use mixtape_core::{
    error::{MixtapeError, Result},
    types::{CreateUser, PlaylistId, TrackId, User, UserId},
};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};

const USER_COLUMNS: &str =
    "id, name, is_admin, playlists, liked_tracks, created_at, version";

fn from_row(row: &SqliteRow) -> Result<User> {
    let playlists: Vec<PlaylistId> = serde_json::from_str(&row.try_get::<String, _>("playlists")?)?;
    let liked_tracks: Vec<TrackId> =
        serde_json::from_str(&row.try_get::<String, _>("liked_tracks")?)?;

    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        is_admin: row.try_get::<i64, _>("is_admin")? != 0,
        playlists,
        liked_tracks,
        created_at: row.try_get("created_at")?,
        version: row.try_get("version")?,
    })
}

/// Create a user with empty collections
pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<User> {
    let id = UserId::generate();

    sqlx::query("INSERT INTO users (id, name, is_admin) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&user.name)
        .bind(user.is_admin)
        .execute(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                MixtapeError::invalid_input(format!("user name already taken: {}", user.name))
            }
            other => other.into(),
        })?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| MixtapeError::storage("Failed to retrieve created user"))
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Find user by exact name
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE name = ?"))
        .bind(name)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY name"))
        .fetch_all(pool)
        .await?;

    rows.iter().map(from_row).collect()
}

/// Save a user if nobody else saved it since it was read
///
/// Fails with `Conflict` when the stored version moved on, `NotFound` when
/// the user no longer exists.
pub async fn save(pool: &SqlitePool, user: &User) -> Result<User> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET name = ?, is_admin = ?, playlists = ?, liked_tracks = ?, version = version + 1
        WHERE id = ? AND version = ?
        "#,
    )
    .bind(&user.name)
    .bind(user.is_admin)
    .bind(serde_json::to_string(&user.playlists)?)
    .bind(serde_json::to_string(&user.liked_tracks)?)
    .bind(&user.id)
    .bind(user.version)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(match get_by_id(pool, &user.id).await? {
            Some(_) => MixtapeError::conflict(format!("user {} was modified concurrently", user.id)),
            None => MixtapeError::not_found("User", user.id.as_str()),
        });
    }

    let mut saved = user.clone();
    saved.version += 1;
    Ok(saved)
}

/// Load a user inside a transaction after taking the write lock on its row
///
/// The version bump doubles as the lock statement, so a read-modify-write
/// of the playlist collection cannot interleave with another writer.
pub(crate) async fn lock_for_update(conn: &mut SqliteConnection, id: &UserId) -> Result<User> {
    let result = sqlx::query("UPDATE users SET version = version + 1 WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MixtapeError::not_found("User", id.as_str()));
    }

    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

    from_row(&row)
}

/// Write back the playlist collection of a user loaded with `lock_for_update`
pub(crate) async fn write_playlists(conn: &mut SqliteConnection, user: &User) -> Result<()> {
    sqlx::query("UPDATE users SET playlists = ? WHERE id = ?")
        .bind(serde_json::to_string(&user.playlists)?)
        .bind(&user.id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Get user's password hash for authentication
///
/// Returns `None` if the user has no credentials
pub async fn get_password_hash(pool: &SqlitePool, user_id: &UserId) -> Result<Option<String>> {
    let row = sqlx::query("SELECT password_hash FROM user_credentials WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    row.map(|r| r.try_get("password_hash"))
        .transpose()
        .map_err(MixtapeError::from)
}

/// Create or update user credentials
///
/// `password_hash` must already be hashed with bcrypt
pub async fn set_password_hash(
    pool: &SqlitePool,
    user_id: &UserId,
    password_hash: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO user_credentials (user_id, password_hash, updated_at)
         VALUES (?, ?, datetime('now'))
         ON CONFLICT(user_id)
         DO UPDATE SET password_hash = excluded.password_hash, updated_at = datetime('now')",
    )
    .bind(user_id)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(())
}
