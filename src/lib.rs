pub mod config;
pub mod error;
pub mod models;
pub mod ratings;
pub mod routes;
pub mod store;

use axum::{
    Router,
    routing::{get, post},
};

use crate::store::JsonStore;

/// The JSON API surface, ready to be merged with the static-file fallback
/// and middleware layers in `main`.
pub fn api_router(store: JsonStore) -> Router {
    Router::new()
        .route("/api/movies", get(routes::list_movies))
        .route("/api/movies/{id}", get(routes::get_movie))
        .route("/api/movies/{id}/comment", post(routes::add_comment))
        .route("/api/movies/{id}/rate", post(routes::rate_movie))
        .route("/api/carousels", get(routes::carousels))
        .route("/api/contact", post(routes::submit_contact))
        .route("/api/contact-list", get(routes::contact_list))
        .with_state(store)
}
