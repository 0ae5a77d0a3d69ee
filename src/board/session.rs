//! Screen-side browse state and stale-load protection.

use std::sync::atomic::{AtomicU64, Ordering};

use super::applications::Application;
use super::domain::{Listing, ListingId};
use super::filter::{browse, FilterState};

/// The three collections as read for one screen refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardSnapshot {
    pub listings: Vec<Listing>,
    pub applications: Vec<Application>,
    pub favorites: Vec<ListingId>,
}

/// Token identifying one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Hands out increasing tickets; only the newest ticket may apply its result.
#[derive(Debug, Default)]
pub struct LoadSequencer {
    latest: AtomicU64,
}

impl LoadSequencer {
    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}

/// Explicit replacement for per-screen mutable state: the filter criteria plus the
/// last accepted snapshot.
#[derive(Debug, Default)]
pub struct BrowseSession {
    pub filter: FilterState,
    snapshot: BoardSnapshot,
    sequencer: LoadSequencer,
}

impl BrowseSession {
    pub fn new(filter: FilterState) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn begin_load(&self) -> LoadTicket {
        self.sequencer.begin()
    }

    /// Apply a finished load. Results from superseded tickets are dropped.
    pub fn finish_load(&mut self, ticket: LoadTicket, snapshot: BoardSnapshot) -> bool {
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(?ticket, "discarding stale load");
            return false;
        }
        self.snapshot = snapshot;
        true
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Listings to render under the current criteria.
    pub fn visible(&self) -> Vec<Listing> {
        browse(&self.snapshot.listings, &self.snapshot.favorites, &self.filter)
    }

    pub fn applications_for(&self, listing_id: &ListingId) -> Vec<&Application> {
        self.snapshot
            .applications
            .iter()
            .filter(|application| &application.listing_id == listing_id)
            .collect()
    }

    pub fn toggle_sort(&mut self) {
        self.filter.sort_order = self.filter.sort_order.toggled();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }
}
