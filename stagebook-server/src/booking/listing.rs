//! Result shaping for listing, search and detail documents

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::partition::{ArtistShow, Partitioned, VenueShow};
use crate::models::{Artist, ArtistSummary, ShowListing, Venue, VenueSummary};

/// One venue inside an area group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaVenue {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing a (city, state) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<AreaVenue>,
}

/// Group venues by distinct (city, state).
///
/// Areas are ordered by (city, state); venues keep their input order. Each
/// venue keeps its own upcoming count.
pub fn group_by_area(venues: Vec<VenueSummary>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    for v in venues {
        let entry = AreaVenue {
            id: v.id,
            name: v.name,
            num_upcoming_shows: v.num_upcoming_shows,
        };
        match areas
            .iter_mut()
            .find(|a| a.city == v.city && a.state == v.state)
        {
            Some(area) => area.venues.push(entry),
            None => areas.push(Area {
                city: v.city,
                state: v.state,
                venues: vec![entry],
            }),
        }
    }
    areas.sort_by(|a, b| (&a.city, &a.state).cmp(&(&b.city, &b.state)));
    areas
}

/// One search match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl From<VenueSummary> for SearchHit {
    fn from(v: VenueSummary) -> Self {
        Self {
            id: v.id,
            name: v.name,
            num_upcoming_shows: v.num_upcoming_shows,
        }
    }
}

impl From<ArtistSummary> for SearchHit {
    fn from(a: ArtistSummary) -> Self {
        Self {
            id: a.id,
            name: a.name,
            num_upcoming_shows: a.num_upcoming_shows,
        }
    }
}

/// Search response: total matches plus one hit per match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

impl<T: Into<SearchHit>> FromIterator<T> for SearchResults {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let data: Vec<SearchHit> = iter.into_iter().map(Into::into).collect();
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Row of the flat show listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowRow {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ShowListing> for ShowRow {
    fn from(s: ShowListing) -> Self {
        Self {
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start_time: s.start_time,
        }
    }
}

/// Row of the flat artist listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistRow {
    pub id: i32,
    pub name: String,
}

impl From<Artist> for ArtistRow {
    fn from(a: Artist) -> Self {
        Self { id: a.id, name: a.name }
    }
}

/// Past and upcoming shows with their counts, flattened into a detail document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowSplit<T> {
    pub past_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows: Vec<T>,
    pub upcoming_shows_count: usize,
}

impl<T> From<Partitioned<T>> for ShowSplit<T> {
    fn from(p: Partitioned<T>) -> Self {
        Self {
            past_shows_count: p.past.len(),
            upcoming_shows_count: p.upcoming.len(),
            past_shows: p.past,
            upcoming_shows: p.upcoming,
        }
    }
}

/// Venue detail page
#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub shows: ShowSplit<ArtistShow>,
}

/// Artist detail page
#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub shows: ShowSplit<VenueShow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i32, name: &str, city: &str, state: &str, upcoming: i64) -> VenueSummary {
        VenueSummary {
            id,
            name: name.into(),
            city: city.into(),
            state: state.into(),
            num_upcoming_shows: upcoming,
        }
    }

    #[test]
    fn each_venue_keeps_its_own_count() {
        let areas = group_by_area(vec![
            summary(1, "The Musical Hop", "San Francisco", "CA", 0),
            summary(2, "The Dueling Pianos Bar", "New York", "NY", 1),
            summary(3, "Park Square Live Music & Coffee", "San Francisco", "CA", 3),
        ]);

        assert_eq!(areas.len(), 2);
        assert_eq!((areas[0].city.as_str(), areas[0].state.as_str()), ("New York", "NY"));

        let sf = &areas[1];
        assert_eq!(sf.city, "San Francisco");
        let counts: Vec<(i32, i64)> = sf.venues.iter().map(|v| (v.id, v.num_upcoming_shows)).collect();
        assert_eq!(counts, vec![(1, 0), (3, 3)]);
    }

    #[test]
    fn same_city_different_state_is_a_different_area() {
        let areas = group_by_area(vec![
            summary(1, "A", "Portland", "OR", 0),
            summary(2, "B", "Portland", "ME", 0),
        ]);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].state, "ME");
    }

    #[test]
    fn search_results_count_matches() {
        let results: SearchResults = vec![
            ArtistSummary { id: 1, name: "Guns N Petals".into(), num_upcoming_shows: 0 },
            ArtistSummary { id: 3, name: "The Wild Sax Band".into(), num_upcoming_shows: 3 },
        ]
        .into_iter()
        .collect();
        assert_eq!(results.count, 2);
        assert_eq!(results.data[1].num_upcoming_shows, 3);

        let empty: SearchResults = Vec::<VenueSummary>::new().into_iter().collect();
        assert_eq!(empty.count, 0);
    }

    #[test]
    fn detail_flattens_record_and_shows() {
        let venue = Venue {
            id: 1,
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: None,
            genres: vec!["Jazz".into()],
            facebook_link: None,
            image_link: None,
            website: None,
            seeking_talent: false,
            seeking_description: None,
        };
        let detail = VenueDetail {
            venue,
            shows: Partitioned::<ArtistShow> {
                past: vec![],
                upcoming: vec![],
            }
            .into(),
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["name"], "The Musical Hop");
        assert_eq!(json["genres"][0], "Jazz");
        assert_eq!(json["past_shows_count"], 0);
        assert!(json["upcoming_shows"].as_array().unwrap().is_empty());
    }
}
