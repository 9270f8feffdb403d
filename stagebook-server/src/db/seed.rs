//! Sample data for demos and manual testing

use chrono::{DateTime, Duration, Utc};

use super::store::{DbError, Store};
use crate::models::{ArtistForm, NewShow, VenueForm};

fn venue(
    name: &str,
    city: &str,
    state: &str,
    address: &str,
    genres: &[&str],
    seeking_talent: bool,
) -> VenueForm {
    VenueForm {
        name: name.to_owned(),
        city: city.to_owned(),
        state: state.to_owned(),
        address: address.to_owned(),
        phone: Some("123-123-1234".to_owned()),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        facebook_link: None,
        image_link: None,
        website: None,
        seeking_talent,
        seeking_description: seeking_talent
            .then(|| "We are on the lookout for a local artist to play every two weeks.".to_owned()),
    }
}

fn artist(name: &str, city: &str, state: &str, genres: &[&str], seeking_venue: bool) -> ArtistForm {
    ArtistForm {
        name: name.to_owned(),
        city: city.to_owned(),
        state: state.to_owned(),
        phone: Some("326-123-5000".to_owned()),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        facebook_link: None,
        image_link: None,
        website: None,
        seeking_venue,
        seeking_description: seeking_venue
            .then(|| "Looking for shows to perform at in the San Francisco Bay Area!".to_owned()),
    }
}

/// Populate an empty store with three venues, three artists and a mix of
/// past and upcoming shows. Does nothing if any venue already exists.
pub async fn seed_if_empty(store: &dyn Store, now: DateTime<Utc>) -> Result<(), DbError> {
    if !store.list_venues().await?.is_empty() {
        return Ok(());
    }

    let hop = store
        .insert_venue(venue(
            "The Musical Hop",
            "San Francisco",
            "CA",
            "1015 Folsom Street",
            &["Jazz", "Reggae", "Folk", "Classical"],
            true,
        ))
        .await?;
    let pianos = store
        .insert_venue(venue(
            "The Dueling Pianos Bar",
            "New York",
            "NY",
            "335 Delancey Street",
            &["Classical", "R&B", "Hip-Hop"],
            false,
        ))
        .await?;
    let park = store
        .insert_venue(venue(
            "Park Square Live Music & Coffee",
            "San Francisco",
            "CA",
            "34 Whiskey Moore Ave",
            &["Rock n Roll", "Jazz", "Classical", "Folk"],
            false,
        ))
        .await?;

    let petals = store
        .insert_artist(artist("Guns N Petals", "San Francisco", "CA", &["Rock n Roll"], true))
        .await?;
    let matt = store
        .insert_artist(artist("Matt Quevado", "New York", "NY", &["Jazz"], false))
        .await?;
    let sax = store
        .insert_artist(artist("The Wild Sax Band", "San Francisco", "CA", &["Jazz", "Classical"], false))
        .await?;

    let bookings = [
        (hop.id, petals.id, now - Duration::days(30)),
        (park.id, matt.id, now - Duration::days(14)),
        (park.id, sax.id, now + Duration::days(7)),
        (park.id, sax.id, now + Duration::days(14)),
        (park.id, sax.id, now + Duration::days(21)),
        (pianos.id, matt.id, now + Duration::days(3)),
    ];
    for (venue_id, artist_id, start_time) in bookings {
        store
            .insert_show(NewShow {
                venue_id,
                artist_id,
                start_time,
            })
            .await?;
    }

    tracing::info!(venues = 3, artists = 3, shows = bookings.len(), "Seeded sample data");
    Ok(())
}
