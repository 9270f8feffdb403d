//! Submitted form data and the choice lists the forms offer

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Serialize;

use super::ValidationError;

/// Genre choices offered by the venue and artist forms.
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// US state abbreviations offered by the venue and artist forms.
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

static GENRE_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| GENRES.iter().copied().collect());

/// Decoded `application/x-www-form-urlencoded` body.
///
/// Keeps every pair in submission order so multi-valued fields
/// (`genres`) survive decoding.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value submitted for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted for `name`, in order.
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Checkbox semantics: absent is false, `y`/`on`/`true`/`1` is true.
    pub fn flag(&self, name: &str) -> bool {
        matches!(
            self.get(name).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("y" | "on" | "true" | "1")
        )
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Validate the submitted genre tags against [`GENRES`].
///
/// Blank entries are dropped. Everything else must match a choice exactly;
/// order and duplicates are kept as submitted.
pub fn genres(values: Vec<&str>) -> Result<Vec<String>, ValidationError> {
    let mut out = Vec::with_capacity(values.len());
    for value in values.into_iter().filter(|v| !v.trim().is_empty()) {
        if !GENRE_SET.contains(value) {
            return Err(ValidationError::InvalidVariant {
                field: "genres",
                value: value.to_owned(),
            });
        }
        out.push(value.to_owned());
    }
    Ok(out)
}

/// Describes a form so the presentation layer can render it.
#[derive(Debug, Clone, Serialize)]
pub struct FormDescriptor {
    pub fields: &'static [&'static str],
    pub required: &'static [&'static str],
    #[serde(skip_serializing_if = "no_choices")]
    pub genres: &'static [&'static str],
    #[serde(skip_serializing_if = "no_choices")]
    pub states: &'static [&'static str],
}

fn no_choices(choices: &&'static [&'static str]) -> bool {
    choices.is_empty()
}
