use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    models::{
        Comment, CommentRequest, CommentResponse, Contact, ContactRequest, ContactResponse,
        Movie, RateRequest, RateResponse,
    },
    ratings,
    store::JsonStore,
};

pub async fn list_movies(State(store): State<JsonStore>) -> AppResult<Json<Vec<Movie>>> {
    let movies = store.load_movies().await?;
    debug!(count = movies.len(), "listing movies");
    Ok(Json(movies.iter().map(Movie::normalized).collect()))
}

pub async fn get_movie(
    State(store): State<JsonStore>,
    Path(id): Path<u32>,
) -> AppResult<Json<Movie>> {
    let movies = store.load_movies().await?;
    let movie = movies
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| AppError::NotFound(format!("movie {id} not found")))?;
    Ok(Json(movie.normalized()))
}

pub async fn carousels(State(store): State<JsonStore>) -> AppResult<Json<Value>> {
    Ok(Json(store.load_carousels().await?))
}

pub async fn add_comment(
    State(store): State<JsonStore>,
    Path(id): Path<u32>,
    Json(req): Json<CommentRequest>,
) -> AppResult<(StatusCode, Json<CommentResponse>)> {
    let user = req.user.as_deref().unwrap_or("").trim();
    let text = req.text.as_deref().unwrap_or("").trim();
    if user.is_empty() || text.is_empty() {
        return Err(AppError::Invalid("user and text are required".to_string()));
    }

    let comment = Comment::new(user, text);
    let created = comment.clone();
    store.update_movie(id, |movie| {
        movie.comments.push(comment);
        Ok(())
    })
    .await?;

    debug!(movie_id = id, "comment added");
    Ok((StatusCode::CREATED, Json(CommentResponse { success: true, comment: created })))
}

pub async fn rate_movie(
    State(store): State<JsonStore>,
    Path(id): Path<u32>,
    Json(req): Json<RateRequest>,
) -> AppResult<Json<RateResponse>> {
    let votes = ratings::validate(&req)?;

    let movie = store
        .update_movie(id, |movie| {
            ratings::apply_rating(movie, votes);
            Ok(())
        })
        .await?;

    debug!(movie_id = id, "rating recorded");
    Ok(Json(RateResponse { success: true, movie }))
}

pub async fn submit_contact(
    State(store): State<JsonStore>,
    Json(req): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<ContactResponse>)> {
    let name = req.name.as_deref().unwrap_or("").trim();
    let email = req.email.as_deref().unwrap_or("").trim();
    let message = req.message.as_deref().unwrap_or("").trim();

    if name.chars().count() < 2 {
        return Err(AppError::Invalid("name too short".to_string()));
    }
    if !valid_email(email) {
        return Err(AppError::Invalid("invalid email".to_string()));
    }

    let contact = store.append_contact(Contact::new(name, email, message)).await?;

    debug!(name = %contact.name, "contact message stored");
    Ok((StatusCode::CREATED, Json(ContactResponse { success: true, contact })))
}

pub async fn contact_list(State(store): State<JsonStore>) -> AppResult<Json<Vec<Contact>>> {
    Ok(Json(store.load_contacts().await?))
}

fn valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.chars().any(char::is_whitespace)
}
