/// API route modules
pub mod auth;
pub mod health;
pub mod playlists;
pub mod tracks;

use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router, every route nested under `/api`
///
/// Authentication is enforced per handler by the `AuthenticatedUser` and
/// `AdminUser` extractors, so public and protected methods can share a path.
pub fn router(app_state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh));

    let track_routes = Router::new()
        .route(
            "/tracks",
            get(tracks::list_tracks).post(tracks::create_track),
        )
        .route("/tracks/like", get(tracks::liked_tracks))
        .route("/tracks/like/:id", put(tracks::like_track))
        .route(
            "/tracks/:id",
            put(tracks::update_track).delete(tracks::delete_track),
        );

    let playlist_routes = Router::new()
        .route(
            "/playlists",
            get(playlists::list_playlists).post(playlists::create_playlist),
        )
        .route("/playlists/favourite", get(playlists::favourite_playlists))
        .route("/playlists/random", get(playlists::random_playlists))
        .route("/playlists/add-song", put(playlists::add_track_to_playlist))
        .route(
            "/playlists/remove-song",
            put(playlists::remove_track_from_playlist),
        )
        .route("/playlists/edit/:id", put(playlists::edit_playlist))
        .route(
            "/playlists/:id",
            get(playlists::get_playlist).delete(playlists::delete_playlist),
        );

    Router::new()
        .nest(
            "/api",
            public_routes.merge(track_routes).merge(playlist_routes),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
