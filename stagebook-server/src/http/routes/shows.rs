//! Show endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::booking::ShowRow;
use crate::http::error::ApiError;
use crate::http::extractors::Submitted;
use crate::http::server::AppState;
use crate::models::{FormDescriptor, NewShow, Show, SHOW_FORM};

#[derive(Serialize)]
pub struct ShowWritten {
    pub message: &'static str,
    pub show: Show,
}

/// GET /shows - every show, joined with its venue and artist
async fn list_shows(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ShowRow>>, ApiError> {
    let shows = state.store.list_shows().await?;
    Ok(Json(shows.into_iter().map(ShowRow::from).collect()))
}

async fn create_show_form() -> Json<FormDescriptor> {
    Json(SHOW_FORM)
}

/// POST /shows/create
async fn create_show(
    State(state): State<Arc<AppState>>,
    Submitted(fields): Submitted,
) -> Result<(StatusCode, Json<ShowWritten>), ApiError> {
    let new_show = NewShow::parse(&fields)?;
    let show = state
        .store
        .insert_show(new_show)
        .await
        .map_err(|e| ApiError::write_failed("An error occurred. Show could not be listed.", e))?;

    tracing::info!(
        show_id = show.id,
        venue_id = show.venue_id,
        artist_id = show.artist_id,
        "Show listed"
    );
    Ok((
        StatusCode::CREATED,
        Json(ShowWritten {
            message: "Show was successfully listed!",
            show,
        }),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::db::Store;
    use crate::http::routes::testing::{app, get, post_form};

    async fn venue_and_artist(app: &axum::Router) {
        post_form(
            app,
            "/venues/create",
            "name=The+Musical+Hop&city=San+Francisco&state=CA&address=1015+Folsom+Street",
        )
        .await;
        post_form(
            app,
            "/artists/create",
            "name=Guns+N+Petals&city=San+Francisco&state=CA&image_link=https%3A%2F%2Fimg.example%2Fgnp.jpg",
        )
        .await;
    }

    #[tokio::test]
    async fn create_then_list() {
        let (app, _) = app();
        venue_and_artist(&app).await;

        let (status, body) = post_form(
            &app,
            "/shows/create",
            "artist_id=1&venue_id=1&start_time=2035-04-01+20%3A00%3A00",
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Show was successfully listed!");
        assert_eq!(body["show"]["start_time"], "2035-04-01T20:00:00Z");

        let (status, rows) = get(&app, "/shows").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            rows,
            serde_json::json!([{
                "venue_id": 1,
                "venue_name": "The Musical Hop",
                "artist_id": 1,
                "artist_name": "Guns N Petals",
                "artist_image_link": "https://img.example/gnp.jpg",
                "start_time": "2035-04-01T20:00:00Z"
            }])
        );
    }

    #[tokio::test]
    async fn new_show_counts_as_upcoming() {
        let (app, _) = app();
        venue_and_artist(&app).await;
        post_form(
            &app,
            "/shows/create",
            "artist_id=1&venue_id=1&start_time=2035-04-01T20%3A00%3A00Z",
        )
        .await;

        let (_, venue) = get(&app, "/venues/1").await;
        assert_eq!(venue["upcoming_shows_count"], 1);
        assert_eq!(venue["upcoming_shows"][0]["artist_image_link"], "https://img.example/gnp.jpg");
        let (_, artist) = get(&app, "/artists/1").await;
        assert_eq!(artist["upcoming_shows"][0]["venue_name"], "The Musical Hop");
    }

    #[tokio::test]
    async fn unknown_venue_fails_without_writing() {
        let (app, store) = app();
        venue_and_artist(&app).await;

        let (status, body) = post_form(
            &app,
            "/shows/create",
            "artist_id=1&venue_id=42&start_time=2035-04-01+20%3A00%3A00",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An error occurred. Show could not be listed.");
        assert!(store.list_shows().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_submissions_are_400() {
        let (app, store) = app();
        venue_and_artist(&app).await;

        for body in [
            "artist_id=1&venue_id=1&start_time=next+tuesday",
            "artist_id=1&venue_id=1",
            "artist_id=one&venue_id=1&start_time=2035-04-01",
            "artist_id=1&venue_id=-3&start_time=2035-04-01",
        ] {
            let (status, _) = post_form(&app, "/shows/create", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        }
        assert!(store.list_shows().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_form_names_fields() {
        let (app, _) = app();
        let (status, body) = get(&app, "/shows/create").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "fields": ["artist_id", "venue_id", "start_time"],
                "required": ["artist_id", "venue_id", "start_time"]
            })
        );
    }
}
