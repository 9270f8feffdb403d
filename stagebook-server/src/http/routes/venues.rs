//! Venue endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::SearchResponse;
use crate::booking::{
    group_by_area, partition_shows, Area, ArtistShow, SearchResults, VenueDetail,
};
use crate::http::error::ApiError;
use crate::http::extractors::{Submitted, ValidId};
use crate::http::server::AppState;
use crate::models::{FormDescriptor, Venue, VenueForm, VENUE_FORM};

/// Optional area filter for the listing
#[derive(Debug, Deserialize)]
pub struct AreaQuery {
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Outcome of a venue write
#[derive(Serialize)]
pub struct VenueWritten {
    pub message: String,
    pub venue: Venue,
}

/// Outcome of a delete
#[derive(Serialize)]
pub struct Deleted {
    pub message: &'static str,
}

/// Edit form pre-filled with the current record
#[derive(Serialize)]
pub struct EditVenue {
    pub form: FormDescriptor,
    pub venue: Venue,
}

/// GET /venues - venues grouped by area, optionally one area only
async fn list_venues(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AreaQuery>,
) -> Result<Json<Vec<Area>>, ApiError> {
    let now = state.clock.now();
    let venues = match (query.city, query.state) {
        (Some(city), Some(st)) => state.store.venues_in_area(&city, &st, now).await?,
        _ => state.store.venue_summaries(now).await?,
    };
    tracing::debug!(venues = venues.len(), "Listing venues by area");
    Ok(Json(group_by_area(venues)))
}

/// POST /venues/search - case-insensitive name substring search
async fn search_venues(
    State(state): State<Arc<AppState>>,
    Submitted(fields): Submitted,
) -> Result<Json<SearchResponse>, ApiError> {
    let search_term = fields.get("search_term").unwrap_or_default().to_owned();
    let hits = state
        .store
        .search_venues(&search_term, state.clock.now())
        .await?;
    Ok(Json(SearchResponse {
        search_term,
        results: hits.into_iter().collect::<SearchResults>(),
    }))
}

/// GET /venues/create - form descriptor
async fn create_venue_form() -> Json<FormDescriptor> {
    Json(VENUE_FORM)
}

/// POST /venues/create - create a venue
async fn create_venue(
    State(state): State<Arc<AppState>>,
    Submitted(fields): Submitted,
) -> Result<(StatusCode, Json<VenueWritten>), ApiError> {
    let form = VenueForm::parse(&fields)?;
    let name = form.name.clone();
    let venue = state.store.insert_venue(form).await.map_err(|e| {
        ApiError::write_failed(format!("An error occurred. Venue {} could not be listed.", name), e)
    })?;

    tracing::info!(venue_id = venue.id, name = %venue.name, "Venue listed");
    Ok((
        StatusCode::CREATED,
        Json(VenueWritten {
            message: format!("Venue {} was successfully listed!", venue.name),
            venue,
        }),
    ))
}

/// GET /venues/{id} - venue with past and upcoming shows
async fn get_venue(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<VenueDetail>, ApiError> {
    let venue = state.store.get_venue(id).await?;
    let shows = state.store.shows_for_venue(id).await?;
    let split = partition_shows::<ArtistShow>(shows, state.clock.now());
    Ok(Json(VenueDetail {
        venue,
        shows: split.into(),
    }))
}

/// DELETE /venues/{id} - delete a venue
async fn delete_venue(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Deleted>, ApiError> {
    state
        .store
        .delete_venue(id)
        .await
        .map_err(|e| ApiError::write_failed("Venue could not be deleted.", e))?;

    tracing::info!(venue_id = id, "Venue deleted");
    Ok(Json(Deleted {
        message: "Venue was successfully deleted.",
    }))
}

/// GET /venues/{id}/edit - current record for pre-filling the form
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<EditVenue>, ApiError> {
    let venue = state.store.get_venue(id).await?;
    Ok(Json(EditVenue {
        form: VENUE_FORM,
        venue,
    }))
}

/// POST /venues/{id}/edit - full-record update
async fn edit_venue(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Submitted(fields): Submitted,
) -> Result<Json<VenueWritten>, ApiError> {
    let form = VenueForm::parse(&fields)?;
    let venue = state
        .store
        .update_venue(id, form)
        .await
        .map_err(|e| ApiError::write_failed("An error occurred. Venue could not be updated.", e))?;

    tracing::info!(venue_id = venue.id, "Venue updated");
    Ok(Json(VenueWritten {
        message: format!("Venue {} was successfully updated", venue.name),
        venue,
    }))
}

/// Venue routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/{id}", get(get_venue).delete(delete_venue))
        .route("/venues/{id}/edit", get(edit_venue_form).post(edit_venue))
}
