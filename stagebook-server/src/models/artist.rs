//! Artist records and the artist form

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::form::{self, FormDescriptor, FormFields, GENRES, STATES};
use super::validation::{optional, present, required};
use super::ValidationError;
use super::{MAX_DESCRIPTION_LEN, MAX_IMAGE_LINK_LEN, MAX_TEXT_LEN};

/// Artist record from the `artists` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Validated artist submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

pub const ARTIST_FORM: FormDescriptor = FormDescriptor {
    fields: &[
        "name",
        "city",
        "state",
        "phone",
        "genres",
        "facebook_link",
        "image_link",
        "website",
        "seeking_venue",
        "seeking_description",
    ],
    required: &["name", "city", "state"],
    genres: GENRES,
    states: STATES,
};

impl ArtistForm {
    pub fn parse(fields: &FormFields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: present("name", fields.get("name"))?,
            city: required("city", fields.get("city"), MAX_TEXT_LEN)?,
            state: required("state", fields.get("state"), MAX_TEXT_LEN)?,
            phone: optional("phone", fields.get("phone"), MAX_TEXT_LEN)?,
            genres: form::genres(fields.all("genres"))?,
            facebook_link: optional("facebook_link", fields.get("facebook_link"), MAX_TEXT_LEN)?,
            image_link: optional("image_link", fields.get("image_link"), MAX_IMAGE_LINK_LEN)?,
            website: optional("website", fields.get("website"), MAX_TEXT_LEN)?,
            seeking_venue: fields.flag("seeking_venue"),
            seeking_description: optional(
                "seeking_description",
                fields.get("seeking_description"),
                MAX_DESCRIPTION_LEN,
            )?,
        })
    }

    pub fn into_artist(self, id: i32) -> Artist {
        Artist {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            genres: self.genres,
            facebook_link: self.facebook_link,
            image_link: self.image_link,
            website: self.website,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
        }
    }
}

/// Artist with its upcoming-show count, for search results
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}
