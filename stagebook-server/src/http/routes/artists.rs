//! Artist endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::SearchResponse;
use crate::booking::{partition_shows, ArtistDetail, ArtistRow, SearchResults, VenueShow};
use crate::http::error::ApiError;
use crate::http::extractors::{Submitted, ValidId};
use crate::http::server::AppState;
use crate::models::{Artist, ArtistForm, FormDescriptor, ARTIST_FORM};

#[derive(Serialize)]
pub struct ArtistWritten {
    pub message: String,
    pub artist: Artist,
}

#[derive(Serialize)]
pub struct EditArtist {
    pub form: FormDescriptor,
    pub artist: Artist,
}

/// GET /artists
async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistRow>>, ApiError> {
    let artists = state.store.list_artists().await?;
    Ok(Json(artists.into_iter().map(ArtistRow::from).collect()))
}

/// POST /artists/search
async fn search_artists(
    State(state): State<Arc<AppState>>,
    Submitted(fields): Submitted,
) -> Result<Json<SearchResponse>, ApiError> {
    let search_term = fields.get("search_term").unwrap_or_default().to_owned();
    let hits = state
        .store
        .search_artists(&search_term, state.clock.now())
        .await?;
    Ok(Json(SearchResponse {
        search_term,
        results: hits.into_iter().collect::<SearchResults>(),
    }))
}

/// GET /artists/create
async fn create_artist_form() -> Json<FormDescriptor> {
    Json(ARTIST_FORM)
}

/// POST /artists/create
async fn create_artist(
    State(state): State<Arc<AppState>>,
    Submitted(fields): Submitted,
) -> Result<(StatusCode, Json<ArtistWritten>), ApiError> {
    let form = ArtistForm::parse(&fields)?;
    let name = form.name.clone();
    let artist = state.store.insert_artist(form).await.map_err(|e| {
        ApiError::write_failed(format!("An error occurred. Artist {} could not be listed.", name), e)
    })?;

    tracing::info!(artist_id = artist.id, name = %artist.name, "Artist listed");
    Ok((
        StatusCode::CREATED,
        Json(ArtistWritten {
            message: format!("Artist {} was successfully listed!", artist.name),
            artist,
        }),
    ))
}

/// GET /artists/{id}
async fn get_artist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ArtistDetail>, ApiError> {
    let artist = state.store.get_artist(id).await?;
    let shows = state.store.shows_for_artist(id).await?;
    let split = partition_shows::<VenueShow>(shows, state.clock.now());
    Ok(Json(ArtistDetail {
        artist,
        shows: split.into(),
    }))
}

/// GET /artists/{id}/edit
async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<EditArtist>, ApiError> {
    let artist = state.store.get_artist(id).await?;
    Ok(Json(EditArtist {
        form: ARTIST_FORM,
        artist,
    }))
}

/// POST /artists/{id}/edit
async fn edit_artist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Submitted(fields): Submitted,
) -> Result<Json<ArtistWritten>, ApiError> {
    let form = ArtistForm::parse(&fields)?;
    let artist = state
        .store
        .update_artist(id, form)
        .await
        .map_err(|e| ApiError::write_failed("An error occurred. Artist could not be updated.", e))?;

    tracing::info!(artist_id = artist.id, "Artist updated");
    Ok(Json(ArtistWritten {
        message: format!("Artist {} was successfully updated", artist.name),
        artist,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/{id}", get(get_artist))
        .route("/artists/{id}/edit", get(edit_artist_form).post(edit_artist))
}
