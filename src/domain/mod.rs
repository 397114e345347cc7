pub mod filter;
pub mod listing;

pub use filter::{apply, distinct_values, FilterSet};
pub use listing::{
    Column, Coordinates, FocusArea, Listing, ListingDraft, Region, StableId, MAX_ABOUT_CHARS,
};
