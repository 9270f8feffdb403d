//! Past/upcoming partitioning of a venue's or artist's shows

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clock::format_display;
use crate::models::ShowListing;

/// Items split around an instant, each side ordered by start time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

/// Split `items` into past (`start < now`) and upcoming (`start >= now`).
///
/// Both sides are sorted by start ascending. The sort is stable, so items
/// with equal start times keep their input order.
pub fn partition<T>(
    items: Vec<T>,
    now: DateTime<Utc>,
    start_of: impl Fn(&T) -> DateTime<Utc>,
) -> Partitioned<T> {
    let (mut past, mut upcoming): (Vec<T>, Vec<T>) =
        items.into_iter().partition(|item| start_of(item) < now);
    past.sort_by_key(|item| start_of(item));
    upcoming.sort_by_key(|item| start_of(item));
    Partitioned { past, upcoming }
}

/// A show on a venue's page: who is playing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowListing> for ArtistShow {
    fn from(s: ShowListing) -> Self {
        Self {
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start_time: format_display(s.start_time),
        }
    }
}

/// A show on an artist's page: where they are playing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowListing> for VenueShow {
    fn from(s: ShowListing) -> Self {
        Self {
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            venue_image_link: s.venue_image_link,
            start_time: format_display(s.start_time),
        }
    }
}

/// Partition joined show rows and convert each side to its display record.
pub fn partition_shows<T: From<ShowListing>>(
    shows: Vec<ShowListing>,
    now: DateTime<Utc>,
) -> Partitioned<T> {
    let Partitioned { past, upcoming } = partition(shows, now, |s| s.start_time);
    Partitioned {
        past: past.into_iter().map(T::from).collect(),
        upcoming: upcoming.into_iter().map(T::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 20, 0, 0).unwrap()
    }

    fn listing(show_id: i32, start_time: DateTime<Utc>) -> ShowListing {
        ShowListing {
            show_id,
            venue_id: 1,
            venue_name: "The Musical Hop".into(),
            venue_image_link: None,
            artist_id: 10 + show_id,
            artist_name: format!("artist {show_id}"),
            artist_image_link: Some(format!("https://img.example.com/{show_id}.jpg")),
            start_time,
        }
    }

    #[test]
    fn boundary_instant_is_upcoming() {
        let t = now();
        let secs = [t - Duration::seconds(1), t, t + Duration::seconds(1)];
        let split = partition(secs.to_vec(), t, |ts| *ts);
        assert_eq!(split.past, vec![t - Duration::seconds(1)]);
        assert_eq!(split.upcoming, vec![t, t + Duration::seconds(1)]);
    }

    #[test]
    fn sides_are_sorted_by_start() {
        let t = now();
        let shows = vec![
            listing(1, t + Duration::days(9)),
            listing(2, t - Duration::days(1)),
            listing(3, t + Duration::days(2)),
            listing(4, t - Duration::days(30)),
        ];
        let split = partition(shows, t, |s| s.start_time);
        let ids = |v: &[ShowListing]| v.iter().map(|s| s.show_id).collect::<Vec<_>>();
        assert_eq!(ids(&split.past), vec![4, 2]);
        assert_eq!(ids(&split.upcoming), vec![3, 1]);
    }

    #[test]
    fn ties_keep_fetch_order() {
        let t = now() + Duration::hours(1);
        let shows = vec![listing(5, t), listing(2, t), listing(9, t)];
        let split = partition(shows, now(), |s| s.start_time);
        let ids: Vec<i32> = split.upcoming.iter().map(|s| s.show_id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn venue_page_resolves_artists() {
        let t = now();
        let split: Partitioned<ArtistShow> =
            partition_shows(vec![listing(1, t), listing(2, t - Duration::days(1))], t);
        assert_eq!(split.past.len(), 1);
        assert_eq!(split.past[0].artist_id, 12);
        assert_eq!(split.upcoming[0].artist_name, "artist 1");
        assert_eq!(split.upcoming[0].start_time, "Tue 01, 01, 2030 8:00PM");
    }

    #[test]
    fn artist_page_resolves_venues() {
        let split: Partitioned<VenueShow> = partition_shows(vec![listing(1, now())], now());
        assert!(split.past.is_empty());
        assert_eq!(split.upcoming[0].venue_id, 1);
        assert_eq!(split.upcoming[0].venue_name, "The Musical Hop");
    }
}
