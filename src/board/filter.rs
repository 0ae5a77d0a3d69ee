//! Listing filter predicate and the browse pipeline (filter, then sort).

use std::collections::HashSet;

use super::domain::{Listing, ListingId};
use super::sort::{sort_by_rate, SortOrder};
use crate::text::{normalize, normalize_str};

/// Screen-local browse criteria. Never persisted; `clear` restores the defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub location: Option<String>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
    pub query: Option<String>,
    pub only_favorites: bool,
    pub open_only: bool,
    pub sort_order: SortOrder,
}

impl FilterState {
    /// Defaults of the explore screen: only open listings.
    pub fn explore() -> Self {
        Self {
            open_only: true,
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Quick-location chip: picking the active location clears it, anything else sets it.
    pub fn toggle_location(&mut self, location: &str) {
        let current = normalize(self.location.as_deref());
        if !current.is_empty() && current == normalize_str(location) {
            self.location = None;
        } else {
            self.location = Some(location.to_string());
        }
    }

    /// True when any criterion would drop a listing.
    pub fn is_active(&self) -> bool {
        ListingPredicate::new(self, &[]).has_criteria()
    }
}

/// A filter state compiled against the favorites set, ready to test listings.
#[derive(Debug)]
pub struct ListingPredicate<'a> {
    open_only: bool,
    favorites: Option<HashSet<&'a str>>,
    location: Option<String>,
    min_rate: Option<f64>,
    max_rate: Option<f64>,
    query: Option<String>,
}

impl<'a> ListingPredicate<'a> {
    pub fn new(filter: &FilterState, favorites: &'a [ListingId]) -> Self {
        let text = |value: Option<&str>| Some(normalize(value)).filter(|value| !value.is_empty());
        let bound = |value: Option<f64>| value.filter(|value| value.is_finite());

        Self {
            open_only: filter.open_only,
            favorites: filter
                .only_favorites
                .then(|| favorites.iter().map(ListingId::as_str).collect()),
            location: text(filter.location.as_deref()),
            min_rate: bound(filter.min_rate),
            max_rate: bound(filter.max_rate),
            query: text(filter.query.as_deref()),
        }
    }

    fn has_criteria(&self) -> bool {
        self.open_only
            || self.favorites.is_some()
            || self.location.is_some()
            || self.min_rate.is_some()
            || self.max_rate.is_some()
            || self.query.is_some()
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if self.open_only && !listing.is_open() {
            return false;
        }

        if let Some(favorites) = &self.favorites {
            if !favorites.contains(listing.id.as_str()) {
                return false;
            }
        }

        let location = normalize(listing.searchable_location().as_deref());
        if let Some(needle) = &self.location {
            if location.is_empty() || !location.contains(needle.as_str()) {
                return false;
            }
        }

        let rate = listing.hourly_rate.unwrap_or(0.0);
        if self.min_rate.is_some_and(|min| rate < min) {
            return false;
        }
        if self.max_rate.is_some_and(|max| rate > max) {
            return false;
        }

        if let Some(query) = &self.query {
            let hit = normalize_str(&listing.title).contains(query.as_str())
                || location.contains(query.as_str())
                || normalize(listing.description.as_deref()).contains(query.as_str());
            if !hit {
                return false;
            }
        }

        true
    }
}

/// Listings satisfying every active criterion, in their original relative order.
pub fn filter_listings(listings: &[Listing], favorites: &[ListingId], filter: &FilterState) -> Vec<Listing> {
    let predicate = ListingPredicate::new(filter, favorites);
    listings
        .iter()
        .filter(|listing| predicate.matches(listing))
        .cloned()
        .collect()
}

/// Filter, then order by rate using `filter.sort_order`.
pub fn browse(listings: &[Listing], favorites: &[ListingId], filter: &FilterState) -> Vec<Listing> {
    sort_by_rate(filter_listings(listings, favorites, filter), filter.sort_order)
}
