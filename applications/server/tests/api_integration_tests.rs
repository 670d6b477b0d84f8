/// API integration tests
/// Tests complete HTTP request/response cycles with real database
mod common;

use axum::http::{Method, StatusCode};
use common::{fixtures, TestApp};
use mixtape_core::{PlaylistId, StorageContext, TrackId};
use serde_json::json;

fn track_body(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "artist": "Artist",
        "album": "Album",
        "img": "https://img.example/a.png",
        "duration": "4:01",
    })
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_track_listing_is_public() {
    let app = TestApp::new().await;
    app.track("Public Song").await;

    let (status, body) = app.send(Method::GET, "/api/tracks", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Public Song");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/playlists", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, _) = app
        .send(Method::GET, "/api/playlists", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::POST, "/api/tracks", None, Some(track_body("x")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_track_administration_requires_admin() {
    let app = TestApp::new().await;
    let (_, admin_token) = app.user("admin", true).await;
    let (_, user_token) = app.user("alice", false).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/tracks",
            Some(&user_token),
            Some(track_body("Song")),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You don't have access to this content");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/tracks",
            Some(&admin_token),
            Some(track_body("Song")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "track created successfully");
    let track_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/tracks/{track_id}"),
            Some(&admin_token),
            Some(json!({ "album": "Remastered" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "track updated successfully");
    assert_eq!(body["data"]["album"], "Remastered");
    assert_eq!(body["data"]["name"], "Song");

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/tracks/{track_id}"),
            Some(&user_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/tracks/{track_id}"),
            Some(&admin_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "track deleted successfully");

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/tracks/{track_id}"),
            Some(&admin_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_track_payload_validation() {
    let app = TestApp::new().await;
    let (_, admin_token) = app.user("admin", true).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/tracks",
            Some(&admin_token),
            Some(json!({ "name": "Song" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "\"artist\" is required");

    let mut with_extra = track_body("Song");
    with_extra["genre"] = json!("rock");
    let (status, _) = app
        .send(Method::POST, "/api/tracks", Some(&admin_token), Some(with_extra))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(app.db.get_all_tracks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_path_id_is_rejected() {
    let app = TestApp::new().await;
    let (_, token) = app.user("alice", false).await;

    let (status, body) = app
        .send(Method::GET, "/api/playlists/not-an-id", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID.");

    let (status, _) = app
        .send(Method::PUT, "/api/tracks/like/123", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Create a playlist, fill it, read it back, then delete it
#[tokio::test]
async fn test_road_trip_scenario() {
    let app = TestApp::new().await;
    let (user, token) = app.user("alice", false).await;
    let track_a = app.track("Track A").await;
    let track_b = app.track("Track B").await;
    let never_added = app.track("Track C").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/playlists",
            Some(&token),
            Some(json!({ "name": "Road Trip", "desc": "", "img": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Road Trip");
    assert_eq!(body["data"]["owner_id"], user.id.as_str());
    let playlist_id = body["data"]["id"].as_str().unwrap().to_string();

    for track in [&track_a, &track_b, &track_a] {
        let (status, body) = app
            .send(
                Method::PUT,
                "/api/playlists/add-song",
                Some(&token),
                Some(json!({ "playlistId": playlist_id, "trackId": track.id })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Track added to playlist successfully");
    }

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/playlists/{playlist_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["playlist"]["tracks"],
        json!([track_a.id, track_b.id])
    );
    assert_eq!(body["data"]["tracks"][0]["name"], "Track A");
    assert_eq!(body["data"]["tracks"][1]["name"], "Track B");

    let (status, body) = app
        .send(Method::GET, "/api/playlists/favourite", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], playlist_id.as_str());

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/playlists/remove-song",
            Some(&token),
            Some(json!({ "playlistId": playlist_id, "trackId": track_a.id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Track removed from playlist successfully");

    // Removing a track that is not in the playlist succeeds and changes nothing
    let (status, body) = app
        .send(
            Method::PUT,
            "/api/playlists/remove-song",
            Some(&token),
            Some(json!({ "playlistId": playlist_id, "trackId": never_added.id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Track removed from playlist successfully");

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/playlists/{playlist_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["playlist"]["tracks"], json!([track_b.id]));

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/playlists/edit/{playlist_id}"),
            Some(&token),
            Some(json!({ "name": "Road Trip 2", "desc": "Summer" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "playlist updated successfully");

    let stored = app
        .db
        .get_playlist(&playlist_id.parse::<PlaylistId>().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Road Trip 2");
    assert_eq!(stored.desc, "Summer");
    assert_eq!(stored.tracks, vec![track_b.id.clone()]);

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/playlists/{playlist_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "playlist removed successfully");

    let (status, body) = app
        .send(Method::GET, "/api/playlists/favourite", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_non_owner_cannot_delete_playlist() {
    let app = TestApp::new().await;
    let (owner, owner_token) = app.user("alice", false).await;
    let (_, other_token) = app.user("bob", false).await;

    let (_, body) = app
        .send(
            Method::POST,
            "/api/playlists",
            Some(&owner_token),
            Some(json!({ "name": "Private" })),
        )
        .await;
    let playlist_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/playlists/{playlist_id}"),
            Some(&other_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let owner = app.db.get_user(&owner.id).await.unwrap().unwrap();
    assert_eq!(owner.playlists.len(), 1);
    assert_eq!(app.db.get_all_playlists().await.unwrap().len(), 1);

    // Other users can still read it
    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/playlists/{playlist_id}"),
            Some(&other_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_playlist_returns_not_found() {
    let app = TestApp::new().await;
    let (_, token) = app.user("alice", false).await;
    let missing = PlaylistId::generate();

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/playlists/{missing}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "playlist not found");

    let (status, _) = app
        .send(
            Method::PUT,
            "/api/playlists/add-song",
            Some(&token),
            Some(json!({ "playlistId": missing, "trackId": TrackId::generate() })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_like_toggle_round_trip() {
    let app = TestApp::new().await;
    let (_, token) = app.user("alice", false).await;
    let track = app.track("Song").await;
    let uri = format!("/api/tracks/like/{}", track.id);

    let (status, body) = app.send(Method::PUT, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "track liked successfully");

    let (_, body) = app
        .send(Method::GET, "/api/tracks/like", Some(&token), None)
        .await;
    assert_eq!(body["data"][0]["id"], track.id.as_str());

    let (status, body) = app.send(Method::PUT, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "track unliked successfully");

    let (_, body) = app
        .send(Method::GET, "/api/tracks/like", Some(&token), None)
        .await;
    assert_eq!(body["data"], json!([]));

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/tracks/like/{}", TrackId::generate()),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "track not found");
}

#[tokio::test]
async fn test_random_playlists() {
    let app = TestApp::new().await;
    let (_, token) = app.user("alice", false).await;

    for i in 0..3 {
        app.send(
            Method::POST,
            "/api/playlists",
            Some(&token),
            Some(json!({ "name": format!("List {i}") })),
        )
        .await;
    }

    let (status, body) = app
        .send(Method::GET, "/api/playlists/random", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

/// Test login flow and token usage
#[tokio::test]
async fn test_login_and_refresh_flow() {
    let app = TestApp::new().await;
    let (user, _) = app.user(fixtures::ADMIN_USERNAME, true).await;
    let hash = app
        .auth_service
        .hash_password(fixtures::ADMIN_PASSWORD)
        .unwrap();
    app.db.set_password_hash(&user.id, &hash).await.unwrap();

    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": fixtures::ADMIN_USERNAME, "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({
                "username": fixtures::ADMIN_USERNAME,
                "password": fixtures::ADMIN_PASSWORD,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    let access_token = body["access_token"].as_str().unwrap().to_string();
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    // The login token carries the admin flag
    let (status, _) = app
        .send(
            Method::POST,
            "/api/tracks",
            Some(&access_token),
            Some(track_body("Song")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/refresh",
            None,
            Some(json!({ "refresh_token": refresh_token })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());

    // A refresh token is not an access token
    let (status, _) = app
        .send(Method::GET, "/api/playlists", Some(&refresh_token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
