//! PostgreSQL-backed store
//!
//! - Writes run in a transaction; dropping it on error rolls back
//! - Listings JOIN shows for counts and display fields (no N+1)
//! - Referential integrity comes from the FK constraints in the schema

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::schema;
use super::store::{like_pattern, DbError, Store};
use crate::models::{
    Artist, ArtistForm, ArtistSummary, NewShow, Show, ShowListing, Venue, VenueForm, VenueSummary,
};

/// Pool size when neither config nor flags set one
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, genres, facebook_link, \
     image_link, website, seeking_talent, seeking_description";

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, genres, facebook_link, image_link, \
     website, seeking_venue, seeking_description";

const VENUE_SUMMARY_SELECT: &str = r#"
    SELECT
        v.id,
        v.name,
        v.city,
        v.state,
        COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
    FROM venues v
    LEFT JOIN shows s ON s.venue_id = v.id
"#;

const SHOW_LISTING_SELECT: &str = r#"
    SELECT
        s.id AS show_id,
        v.id AS venue_id,
        v.name AS venue_name,
        v.image_link AS venue_image_link,
        a.id AS artist_id,
        a.name AS artist_name,
        a.image_link AS artist_image_link,
        s.start_time
    FROM shows s
    JOIN venues v ON v.id = s.venue_id
    JOIN artists a ON a.id = s.artist_id
"#;

/// Store backed by a Postgres connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool of at most `max_connections` against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        tracing::debug!(max_connections, "Connected to Postgres");
        Ok(Self::new(pool))
    }

    /// Bring the schema up to date on this store's database.
    pub async fn migrate(&self) -> Result<(), DbError> {
        schema::migrate(&self.pool).await
    }
}

/// Turn FK violations into [`DbError::Constraint`]; everything else stays sqlx.
fn classify(err: sqlx::Error) -> DbError {
    match err.as_database_error() {
        Some(db) if db.is_foreign_key_violation() => DbError::Constraint(db.message().to_owned()),
        _ => DbError::Sqlx(err),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_venue(&self, form: VenueForm) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let venue: Venue = sqlx::query_as(&format!(
            r#"
            INSERT INTO venues (name, city, state, address, phone, genres, facebook_link,
                                image_link, website, seeking_talent, seeking_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(&form.name)
        .bind(&form.city)
        .bind(&form.state)
        .bind(&form.address)
        .bind(&form.phone)
        .bind(&form.genres)
        .bind(&form.facebook_link)
        .bind(&form.image_link)
        .bind(&form.website)
        .bind(form.seeking_talent)
        .bind(&form.seeking_description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(venue)
    }

    async fn get_venue(&self, id: i32) -> Result<Venue, DbError> {
        sqlx::query_as(&format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("venue", id))
    }

    async fn list_venues(&self) -> Result<Vec<Venue>, DbError> {
        let venues = sqlx::query_as(&format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(venues)
    }

    async fn update_venue(&self, id: i32, form: VenueForm) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let venue: Venue = sqlx::query_as(&format!(
            r#"
            UPDATE venues SET
                name = $2, city = $3, state = $4, address = $5, phone = $6, genres = $7,
                facebook_link = $8, image_link = $9, website = $10, seeking_talent = $11,
                seeking_description = $12
            WHERE id = $1
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&form.name)
        .bind(&form.city)
        .bind(&form.state)
        .bind(&form.address)
        .bind(&form.phone)
        .bind(&form.genres)
        .bind(&form.facebook_link)
        .bind(&form.image_link)
        .bind(&form.website)
        .bind(form.seeking_talent)
        .bind(&form.seeking_description)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("venue", id))?;

        tx.commit().await?;
        Ok(venue)
    }

    async fn delete_venue(&self, id: i32) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("venue", id));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn venue_summaries(&self, now: DateTime<Utc>) -> Result<Vec<VenueSummary>, DbError> {
        let rows = sqlx::query_as(&format!(
            "{VENUE_SUMMARY_SELECT} GROUP BY v.id ORDER BY v.id"
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn venues_in_area(
        &self,
        city: &str,
        state: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueSummary>, DbError> {
        let rows = sqlx::query_as(&format!(
            "{VENUE_SUMMARY_SELECT} WHERE v.city = $2 AND v.state = $3 GROUP BY v.id ORDER BY v.id"
        ))
        .bind(now)
        .bind(city)
        .bind(state)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn search_venues(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueSummary>, DbError> {
        let rows = sqlx::query_as(&format!(
            r#"{VENUE_SUMMARY_SELECT} WHERE v.name ILIKE $2 ESCAPE '\' GROUP BY v.id ORDER BY v.id"#
        ))
        .bind(now)
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_artist(&self, form: ArtistForm) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let artist: Artist = sqlx::query_as(&format!(
            r#"
            INSERT INTO artists (name, city, state, phone, genres, facebook_link, image_link,
                                 website, seeking_venue, seeking_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ARTIST_COLUMNS}
            "#
        ))
        .bind(&form.name)
        .bind(&form.city)
        .bind(&form.state)
        .bind(&form.phone)
        .bind(&form.genres)
        .bind(&form.facebook_link)
        .bind(&form.image_link)
        .bind(&form.website)
        .bind(form.seeking_venue)
        .bind(&form.seeking_description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(artist)
    }

    async fn get_artist(&self, id: i32) -> Result<Artist, DbError> {
        sqlx::query_as(&format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("artist", id))
    }

    async fn list_artists(&self) -> Result<Vec<Artist>, DbError> {
        let artists = sqlx::query_as(&format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(artists)
    }

    async fn update_artist(&self, id: i32, form: ArtistForm) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let artist: Artist = sqlx::query_as(&format!(
            r#"
            UPDATE artists SET
                name = $2, city = $3, state = $4, phone = $5, genres = $6, facebook_link = $7,
                image_link = $8, website = $9, seeking_venue = $10, seeking_description = $11
            WHERE id = $1
            RETURNING {ARTIST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&form.name)
        .bind(&form.city)
        .bind(&form.state)
        .bind(&form.phone)
        .bind(&form.genres)
        .bind(&form.facebook_link)
        .bind(&form.image_link)
        .bind(&form.website)
        .bind(form.seeking_venue)
        .bind(&form.seeking_description)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("artist", id))?;

        tx.commit().await?;
        Ok(artist)
    }

    async fn search_artists(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ArtistSummary>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                a.id,
                a.name,
                COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE a.name ILIKE $2 ESCAPE '\'
            GROUP BY a.id
            ORDER BY a.id
            "#,
        )
        .bind(now)
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_show(&self, show: NewShow) -> Result<Show, DbError> {
        let mut tx = self.pool.begin().await?;

        let show: Show = sqlx::query_as(
            r#"
            INSERT INTO shows (venue_id, artist_id, start_time)
            VALUES ($1, $2, $3)
            RETURNING id, venue_id, artist_id, start_time
            "#,
        )
        .bind(show.venue_id)
        .bind(show.artist_id)
        .bind(show.start_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;

        tx.commit().await?;
        Ok(show)
    }

    async fn list_shows(&self) -> Result<Vec<ShowListing>, DbError> {
        let rows = sqlx::query_as(&format!("{SHOW_LISTING_SELECT} ORDER BY s.id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn shows_for_venue(&self, venue_id: i32) -> Result<Vec<ShowListing>, DbError> {
        let rows = sqlx::query_as(&format!(
            "{SHOW_LISTING_SELECT} WHERE s.venue_id = $1 ORDER BY s.id"
        ))
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn shows_for_artist(&self, artist_id: i32) -> Result<Vec<ShowListing>, DbError> {
        let rows = sqlx::query_as(&format!(
            "{SHOW_LISTING_SELECT} WHERE s.artist_id = $1 ORDER BY s.id"
        ))
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    // Run with: DATABASE_URL=postgres://... cargo test -p stagebook-server -- --ignored

    async fn store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let store = PgStore::connect(&url, DEFAULT_MAX_CONNECTIONS)
            .await
            .expect("connect failed");
        store.migrate().await.expect("migrate failed");
        store
    }

    fn venue_form(name: &str) -> VenueForm {
        VenueForm {
            name: name.to_owned(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: None,
            genres: vec!["Jazz".into(), "Folk".into()],
            facebook_link: None,
            image_link: None,
            website: None,
            seeking_talent: true,
            seeking_description: Some("looking".into()),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn venue_round_trip_preserves_fields() {
        let store = store().await;
        let created = store.insert_venue(venue_form("pg round trip")).await.unwrap();
        let fetched = store.get_venue(created.id).await.unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.genres, vec!["Jazz", "Folk"]);
        store.delete_venue(created.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn show_with_unknown_venue_is_constraint_error() {
        let store = store().await;
        let err = store
            .insert_show(NewShow {
                venue_id: i32::MAX,
                artist_id: i32::MAX,
                start_time: Utc::now() + Duration::days(1),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn search_treats_wildcards_literally() {
        let store = store().await;
        let venue = store.insert_venue(venue_form("100% Live")).await.unwrap();
        let hits = store.search_venues("0% l", Utc::now()).await.unwrap();
        assert!(hits.iter().any(|h| h.id == venue.id));
        let none = store.search_venues("1_0%", Utc::now()).await.unwrap();
        assert!(none.iter().all(|h| h.id != venue.id));
        store.delete_venue(venue.id).await.unwrap();
    }
}
