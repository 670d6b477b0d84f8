//! Integration tests for tracks vertical slice
//!
//! Tests track catalog operations including:
//! - CRUD
//! - Partial updates
//! - Ordered id resolution with dangling ids


use mixtape_core::types::*;
use test_helpers::*;

#[tokio::test]
async fn test_create_and_get_track() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let track = create_test_track(pool, "Song").await;

    let retrieved = mixtape_storage::tracks::get_by_id(pool, &track.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(retrieved, track);

    let all = mixtape_storage::tracks::get_all(pool).await.unwrap();
    assert_eq!(all, vec![track]);
}

#[tokio::test]
async fn test_partial_update() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let track = create_test_track(pool, "Song").await;

    let updated = mixtape_storage::tracks::update(
        pool,
        &track.id,
        UpdateTrack {
            name: Some("Renamed".to_string()),
            duration: Some("4:01".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.duration, "4:01");
    assert_eq!(updated.artist, track.artist);
    assert_eq!(updated.album, track.album);
    assert_eq!(updated.img, track.img);
}

#[tokio::test]
async fn test_update_missing_track() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let result = mixtape_storage::tracks::update(
        pool,
        &TrackId::generate(),
        UpdateTrack {
            name: Some("x".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_track() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let track = create_test_track(pool, "Song").await;

    assert!(mixtape_storage::tracks::delete(pool, &track.id).await.unwrap());
    assert!(!mixtape_storage::tracks::delete(pool, &track.id).await.unwrap());
    assert!(mixtape_storage::tracks::get_by_id(pool, &track.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_get_by_ids_keeps_order_and_skips_dangling() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = create_test_track(pool, "A").await;
    let b = create_test_track(pool, "B").await;
    let c = create_test_track(pool, "C").await;

    let ids = vec![c.id.clone(), TrackId::generate(), a.id.clone(), b.id.clone()];
    let tracks = mixtape_storage::tracks::get_by_ids(pool, &ids).await.unwrap();

    let names: Vec<_> = tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);

    assert!(mixtape_storage::tracks::get_by_ids(pool, &[])
        .await
        .unwrap()
        .is_empty());
}
