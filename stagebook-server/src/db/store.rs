//! Record store trait shared by the Postgres and in-memory backends

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
    Artist, ArtistForm, ArtistSummary, NewShow, Show, ShowListing, Venue, VenueForm, VenueSummary,
};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("constraint violation: {0}")]
    Constraint(String),
}

impl DbError {
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// Storage for venues, artists and shows.
///
/// Lists come back in primary-key order. Upcoming counts include only shows
/// strictly after `now`. A failed write leaves prior state untouched.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_venue(&self, form: VenueForm) -> Result<Venue, DbError>;
    async fn get_venue(&self, id: i32) -> Result<Venue, DbError>;
    async fn list_venues(&self) -> Result<Vec<Venue>, DbError>;
    async fn update_venue(&self, id: i32, form: VenueForm) -> Result<Venue, DbError>;
    /// Fails with a constraint violation while the venue still has shows.
    async fn delete_venue(&self, id: i32) -> Result<(), DbError>;

    /// Every venue with its upcoming-show count.
    async fn venue_summaries(&self, now: DateTime<Utc>) -> Result<Vec<VenueSummary>, DbError>;
    /// Venues whose city and state equal the given pair.
    async fn venues_in_area(
        &self,
        city: &str,
        state: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueSummary>, DbError>;
    /// Case-insensitive substring match on venue name.
    async fn search_venues(&self, term: &str, now: DateTime<Utc>)
        -> Result<Vec<VenueSummary>, DbError>;

    async fn insert_artist(&self, form: ArtistForm) -> Result<Artist, DbError>;
    async fn get_artist(&self, id: i32) -> Result<Artist, DbError>;
    async fn list_artists(&self) -> Result<Vec<Artist>, DbError>;
    async fn update_artist(&self, id: i32, form: ArtistForm) -> Result<Artist, DbError>;
    /// Case-insensitive substring match on artist name.
    async fn search_artists(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ArtistSummary>, DbError>;

    /// Fails with a constraint violation if the venue or artist is unknown.
    async fn insert_show(&self, show: NewShow) -> Result<Show, DbError>;
    async fn list_shows(&self) -> Result<Vec<ShowListing>, DbError>;
    async fn shows_for_venue(&self, venue_id: i32) -> Result<Vec<ShowListing>, DbError>;
    async fn shows_for_artist(&self, artist_id: i32) -> Result<Vec<ShowListing>, DbError>;

    /// Cheap round trip to the backend, for health checks.
    async fn ping(&self) -> Result<(), DbError>;
}

/// Build an `ILIKE` pattern that matches `term` literally anywhere in the
/// column. Escape character is `\`.
pub fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_term() {
        assert_eq!(like_pattern("Hop"), "%Hop%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }

    #[test]
    fn like_pattern_escapes_single_char_wildcard() {
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
    }

    #[test]
    fn not_found_display() {
        let err = DbError::not_found("venue", 42);
        assert_eq!(err.to_string(), "not found: venue '42'");
    }
}
