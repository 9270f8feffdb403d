//! Venue records and the venue form

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::form::{self, FormDescriptor, FormFields, GENRES, STATES};
use super::validation::{optional, present, required};
use super::ValidationError;
use super::{MAX_DESCRIPTION_LEN, MAX_IMAGE_LINK_LEN, MAX_TEXT_LEN};

/// Venue record from the `venues` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Validated venue submission; used for both create and full-record edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

pub const VENUE_FORM: FormDescriptor = FormDescriptor {
    fields: &[
        "name",
        "city",
        "state",
        "address",
        "phone",
        "genres",
        "facebook_link",
        "image_link",
        "website",
        "seeking_talent",
        "seeking_description",
    ],
    required: &["name", "city", "state", "address"],
    genres: GENRES,
    states: STATES,
};

impl VenueForm {
    pub fn parse(fields: &FormFields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: present("name", fields.get("name"))?,
            city: required("city", fields.get("city"), MAX_TEXT_LEN)?,
            state: required("state", fields.get("state"), MAX_TEXT_LEN)?,
            address: required("address", fields.get("address"), MAX_TEXT_LEN)?,
            phone: optional("phone", fields.get("phone"), MAX_TEXT_LEN)?,
            genres: form::genres(fields.all("genres"))?,
            facebook_link: optional("facebook_link", fields.get("facebook_link"), MAX_TEXT_LEN)?,
            image_link: optional("image_link", fields.get("image_link"), MAX_IMAGE_LINK_LEN)?,
            website: optional("website", fields.get("website"), MAX_TEXT_LEN)?,
            seeking_talent: fields.flag("seeking_talent"),
            seeking_description: optional(
                "seeking_description",
                fields.get("seeking_description"),
                MAX_DESCRIPTION_LEN,
            )?,
        })
    }

    pub fn into_venue(self, id: i32) -> Venue {
        Venue {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            genres: self.genres,
            facebook_link: self.facebook_link,
            image_link: self.image_link,
            website: self.website,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
        }
    }
}

impl From<Venue> for VenueForm {
    fn from(v: Venue) -> Self {
        Self {
            name: v.name,
            city: v.city,
            state: v.state,
            address: v.address,
            phone: v.phone,
            genres: v.genres,
            facebook_link: v.facebook_link,
            image_link: v.image_link,
            website: v.website,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description,
        }
    }
}

/// Venue with its upcoming-show count, for listings and search
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}
