//! Show records (venue/artist bookings) and the show form

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::form::{FormDescriptor, FormFields};
use super::validation::record_id;
use super::ValidationError;

/// Naive timestamp layouts accepted from the show form, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Show record from the `shows` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: i32,
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DateTime<Utc>,
}

/// Validated show submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DateTime<Utc>,
}

pub const SHOW_FORM: FormDescriptor = FormDescriptor {
    fields: &["artist_id", "venue_id", "start_time"],
    required: &["artist_id", "venue_id", "start_time"],
    genres: &[],
    states: &[],
};

impl NewShow {
    pub fn parse(fields: &FormFields) -> Result<Self, ValidationError> {
        let start = fields
            .get("start_time")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::Empty { field: "start_time" })?;

        Ok(Self {
            venue_id: record_id("venue_id", fields.get("venue_id"))?,
            artist_id: record_id("artist_id", fields.get("artist_id"))?,
            start_time: parse_start_time(start)?,
        })
    }

    pub fn into_show(self, id: i32) -> Show {
        Show {
            id,
            venue_id: self.venue_id,
            artist_id: self.artist_id,
            start_time: self.start_time,
        }
    }
}

/// Parse a submitted start time.
///
/// RFC 3339 keeps its offset; the naive layouts in [`NAIVE_FORMATS`] and a
/// bare `YYYY-MM-DD` (midnight) are taken as UTC.
pub fn parse_start_time(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(ValidationError::InvalidFormat {
        field: "start_time",
        reason: "expected RFC 3339 or YYYY-MM-DD HH:MM:SS",
    })
}

/// A show joined with the display fields of its venue and artist
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ShowListing {
    pub show_id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_form_layout_as_utc() {
        let ts = parse_start_time("2019-05-21 21:30:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap());
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = parse_start_time("2035-04-01T20:00:00-07:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2035, 4, 2, 3, 0, 0).unwrap());
    }

    #[test]
    fn parses_bare_date() {
        let ts = parse_start_time("2035-04-01").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2035, 4, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_start_time("next tuesday"),
            Err(ValidationError::InvalidFormat { field: "start_time", .. })
        ));
    }

    #[test]
    fn show_form_requires_all_fields() {
        let fields: FormFields = [("venue_id", "1"), ("artist_id", "2")].into_iter().collect();
        assert_eq!(
            NewShow::parse(&fields).unwrap_err(),
            ValidationError::Empty { field: "start_time" }
        );

        let fields: FormFields = [
            ("venue_id", "1"),
            ("artist_id", "2"),
            ("start_time", "2019-06-15 23:00:00"),
        ]
        .into_iter()
        .collect();
        let show = NewShow::parse(&fields).unwrap();
        assert_eq!((show.venue_id, show.artist_id), (1, 2));
    }
}
