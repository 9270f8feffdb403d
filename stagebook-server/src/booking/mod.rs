//! Query/aggregation layer
//!
//! Pure functions over rows fetched from a [`Store`](crate::db::Store):
//! show partitioning, area grouping and search result shaping. Nothing in
//! here touches storage or reads the clock directly.

pub mod clock;
pub mod listing;
pub mod partition;

pub use clock::{format_display, Clock, FixedClock, SystemClock};
pub use listing::{
    group_by_area, Area, AreaVenue, ArtistDetail, ArtistRow, SearchHit, SearchResults, ShowRow,
    ShowSplit, VenueDetail,
};
pub use partition::{partition, partition_shows, ArtistShow, Partitioned, VenueShow};
