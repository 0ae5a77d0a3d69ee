//! Job board core: listings, applications, favorites, and the browse pipeline.

pub mod applications;
pub mod domain;
pub mod filter;
pub mod seed;
pub mod service;
pub mod session;
pub mod sort;

#[cfg(test)]
mod tests;

pub use applications::{Application, ApplicationId, ApplicationStatus, NewApplication};
pub use domain::{
    merge_listing, Currency, Listing, ListingId, ListingPatch, ListingStatus, NewListing,
};
pub use filter::{browse, filter_listings, FilterState, ListingPredicate};
pub use service::{BoardError, DeleteOutcome, Entity, JobBoard, ValidationError};
pub use session::{BoardSnapshot, BrowseSession, LoadSequencer, LoadTicket};
pub use sort::{sort_by_rate, sort_listings, SortOrder};
