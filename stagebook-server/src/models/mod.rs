//! Domain models with validation at construction
//!
//! Form submissions are validated when converted into these types.
//! Invalid input returns ValidationError, not panic.

pub mod artist;
pub mod form;
pub mod show;
pub mod validation;
pub mod venue;

pub use artist::{Artist, ArtistForm, ArtistSummary, ARTIST_FORM};
pub use form::{FormDescriptor, FormFields};
pub use show::{NewShow, Show, ShowListing, SHOW_FORM};
pub use validation::ValidationError;
pub use venue::{Venue, VenueForm, VenueSummary, VENUE_FORM};

/// Column limit for names, places, phone numbers and most links
pub const MAX_TEXT_LEN: usize = 120;

/// Column limit for `image_link`
pub const MAX_IMAGE_LINK_LEN: usize = 500;

/// Column limit for `seeking_description`
pub const MAX_DESCRIPTION_LEN: usize = 500;
