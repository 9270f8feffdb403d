//! In-process store
//!
//! Backs tests and `serve --in-memory`. Mirrors the Postgres constraints:
//! shows must reference existing rows, and a venue with shows can't be
//! deleted. Every write validates before it mutates.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::store::{DbError, Store};
use crate::models::{
    Artist, ArtistForm, ArtistSummary, NewShow, Show, ShowListing, Venue, VenueForm, VenueSummary,
};

#[derive(Default)]
struct Tables {
    venues: BTreeMap<i32, Venue>,
    artists: BTreeMap<i32, Artist>,
    shows: BTreeMap<i32, Show>,
    next_venue_id: i32,
    next_artist_id: i32,
    next_show_id: i32,
}

impl Tables {
    fn upcoming_for_venue(&self, venue_id: i32, now: DateTime<Utc>) -> i64 {
        self.shows
            .values()
            .filter(|s| s.venue_id == venue_id && s.start_time > now)
            .count() as i64
    }

    fn upcoming_for_artist(&self, artist_id: i32, now: DateTime<Utc>) -> i64 {
        self.shows
            .values()
            .filter(|s| s.artist_id == artist_id && s.start_time > now)
            .count() as i64
    }

    fn venue_summary(&self, venue: &Venue, now: DateTime<Utc>) -> VenueSummary {
        VenueSummary {
            id: venue.id,
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            num_upcoming_shows: self.upcoming_for_venue(venue.id, now),
        }
    }

    /// Shows matching `keep`, joined with venue and artist display fields.
    fn listings(&self, keep: impl Fn(&Show) -> bool) -> Result<Vec<ShowListing>, DbError> {
        self.shows
            .values()
            .filter(|&s| keep(s))
            .map(|s| {
                let venue = self.venues.get(&s.venue_id).ok_or_else(|| {
                    DbError::Constraint(format!("show {} references missing venue", s.id))
                })?;
                let artist = self.artists.get(&s.artist_id).ok_or_else(|| {
                    DbError::Constraint(format!("show {} references missing artist", s.id))
                })?;
                Ok(ShowListing {
                    show_id: s.id,
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    venue_image_link: venue.image_link.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: s.start_time,
                })
            })
            .collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Store that keeps every table in memory behind one lock
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_venue(&self, form: VenueForm) -> Result<Venue, DbError> {
        let mut t = self.tables.write().await;
        t.next_venue_id += 1;
        let venue = form.into_venue(t.next_venue_id);
        t.venues.insert(venue.id, venue.clone());
        Ok(venue)
    }

    async fn get_venue(&self, id: i32) -> Result<Venue, DbError> {
        let t = self.tables.read().await;
        t.venues
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found("venue", id))
    }

    async fn list_venues(&self) -> Result<Vec<Venue>, DbError> {
        let t = self.tables.read().await;
        Ok(t.venues.values().cloned().collect())
    }

    async fn update_venue(&self, id: i32, form: VenueForm) -> Result<Venue, DbError> {
        let mut t = self.tables.write().await;
        let slot = t
            .venues
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("venue", id))?;
        *slot = form.into_venue(id);
        Ok(slot.clone())
    }

    async fn delete_venue(&self, id: i32) -> Result<(), DbError> {
        let mut t = self.tables.write().await;
        if !t.venues.contains_key(&id) {
            return Err(DbError::not_found("venue", id));
        }
        if t.shows.values().any(|s| s.venue_id == id) {
            return Err(DbError::Constraint(format!(
                "venue {} is still referenced by shows",
                id
            )));
        }
        t.venues.remove(&id);
        Ok(())
    }

    async fn venue_summaries(&self, now: DateTime<Utc>) -> Result<Vec<VenueSummary>, DbError> {
        let t = self.tables.read().await;
        Ok(t.venues.values().map(|v| t.venue_summary(v, now)).collect())
    }

    async fn venues_in_area(
        &self,
        city: &str,
        state: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueSummary>, DbError> {
        let t = self.tables.read().await;
        Ok(t.venues
            .values()
            .filter(|v| v.city == city && v.state == state)
            .map(|v| t.venue_summary(v, now))
            .collect())
    }

    async fn search_venues(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueSummary>, DbError> {
        let t = self.tables.read().await;
        Ok(t.venues
            .values()
            .filter(|v| contains_ignore_case(&v.name, term))
            .map(|v| t.venue_summary(v, now))
            .collect())
    }

    async fn insert_artist(&self, form: ArtistForm) -> Result<Artist, DbError> {
        let mut t = self.tables.write().await;
        t.next_artist_id += 1;
        let artist = form.into_artist(t.next_artist_id);
        t.artists.insert(artist.id, artist.clone());
        Ok(artist)
    }

    async fn get_artist(&self, id: i32) -> Result<Artist, DbError> {
        let t = self.tables.read().await;
        t.artists
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found("artist", id))
    }

    async fn list_artists(&self) -> Result<Vec<Artist>, DbError> {
        let t = self.tables.read().await;
        Ok(t.artists.values().cloned().collect())
    }

    async fn update_artist(&self, id: i32, form: ArtistForm) -> Result<Artist, DbError> {
        let mut t = self.tables.write().await;
        let slot = t
            .artists
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("artist", id))?;
        *slot = form.into_artist(id);
        Ok(slot.clone())
    }

    async fn search_artists(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ArtistSummary>, DbError> {
        let t = self.tables.read().await;
        Ok(t.artists
            .values()
            .filter(|a| contains_ignore_case(&a.name, term))
            .map(|a| ArtistSummary {
                id: a.id,
                name: a.name.clone(),
                num_upcoming_shows: t.upcoming_for_artist(a.id, now),
            })
            .collect())
    }

    async fn insert_show(&self, show: NewShow) -> Result<Show, DbError> {
        let mut t = self.tables.write().await;
        if !t.venues.contains_key(&show.venue_id) {
            return Err(DbError::Constraint(format!(
                "venue {} does not exist",
                show.venue_id
            )));
        }
        if !t.artists.contains_key(&show.artist_id) {
            return Err(DbError::Constraint(format!(
                "artist {} does not exist",
                show.artist_id
            )));
        }
        t.next_show_id += 1;
        let show = show.into_show(t.next_show_id);
        t.shows.insert(show.id, show.clone());
        Ok(show)
    }

    async fn list_shows(&self) -> Result<Vec<ShowListing>, DbError> {
        self.tables.read().await.listings(|_| true)
    }

    async fn shows_for_venue(&self, venue_id: i32) -> Result<Vec<ShowListing>, DbError> {
        self.tables.read().await.listings(|s| s.venue_id == venue_id)
    }

    async fn shows_for_artist(&self, artist_id: i32) -> Result<Vec<ShowListing>, DbError> {
        self.tables.read().await.listings(|s| s.artist_id == artist_id)
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
