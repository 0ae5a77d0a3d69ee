use std::fmt;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info, warn};

use super::applications::{Application, ApplicationId, ApplicationStatus, NewApplication};
use super::domain::{merge_listing, Listing, ListingId, ListingPatch, NewListing};
use super::filter::{browse, FilterState};
use super::session::BoardSnapshot;
use crate::storage::{encode_collection, load_collection, save_collection, KeyValueStore, StoreError, StoreKey};

/// Input rejected before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title is required")]
    TitleRequired,
    #[error("title must be at least {min} characters")]
    TitleTooShort { min: usize },
    #[error("hourly rate must be a non-negative number")]
    InvalidRate,
    #[error("duration in days must be a non-negative number")]
    InvalidDurationDays,
    #[error("hours per day must be a non-negative number")]
    InvalidHoursPerDay,
    #[error("required head count must be a non-negative number")]
    InvalidRequiredCount,
    #[error("shift end is before its start")]
    ScheduleEndsBeforeStart,
    #[error("applicant name is required")]
    NameRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Listing,
    Application,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Listing => f.write_str("listing"),
            Entity::Application => f.write_str("application"),
        }
    }
}

/// Error raised by board lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} '{id}' not found")]
    NotFound { entity: Entity, id: String },
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("board write lock poisoned")]
    LockPoisoned,
}

impl BoardError {
    fn listing_not_found(id: &ListingId) -> Self {
        Self::NotFound {
            entity: Entity::Listing,
            id: id.0.clone(),
        }
    }

    fn application_not_found(id: &ApplicationId) -> Self {
        Self::NotFound {
            entity: Entity::Application,
            id: id.0.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BoardError::NotFound { .. })
    }
}

/// What a listing delete removed.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    pub listing: Listing,
    pub removed_applications: usize,
}

/// Lifecycle operations over the local store.
///
/// Every mutation is a full read, an in-memory transform and a full write of the
/// affected collections. Mutations are serialized through `write_lock`, so concurrent
/// callers sharing one board cannot lose each other's updates.
pub struct JobBoard<S> {
    store: S,
    owner_id: String,
    write_lock: Mutex<()>,
}

impl<S> JobBoard<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S, owner_id: impl Into<String>) -> Self {
        Self {
            store,
            owner_id: owner_id.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn write_guard(&self) -> Result<MutexGuard<'_, ()>, BoardError> {
        self.write_lock.lock().map_err(|_| BoardError::LockPoisoned)
    }

    pub fn listings(&self) -> Vec<Listing> {
        load_collection(&self.store, StoreKey::Listings)
    }

    pub fn applications(&self) -> Vec<Application> {
        load_collection(&self.store, StoreKey::Applications)
    }

    pub fn favorites(&self) -> Vec<ListingId> {
        load_collection(&self.store, StoreKey::Favorites)
    }

    /// All three collections, read back to back.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            listings: self.listings(),
            applications: self.applications(),
            favorites: self.favorites(),
        }
    }

    pub fn listing(&self, id: &ListingId) -> Result<Listing, BoardError> {
        self.listings()
            .into_iter()
            .find(|listing| &listing.id == id)
            .ok_or_else(|| BoardError::listing_not_found(id))
    }

    pub fn listings_owned_by(&self, owner_id: &str) -> Vec<Listing> {
        self.listings()
            .into_iter()
            .filter(|listing| listing.owner_id == owner_id)
            .collect()
    }

    /// Listings posted by the local owner.
    pub fn my_listings(&self) -> Vec<Listing> {
        self.listings_owned_by(&self.owner_id)
    }

    pub fn applications_for(&self, listing_id: &ListingId) -> Vec<Application> {
        self.applications()
            .into_iter()
            .filter(|application| &application.listing_id == listing_id)
            .collect()
    }

    /// Filtered and rate-ordered listings for a browse screen.
    pub fn browse(&self, filter: &FilterState) -> Vec<Listing> {
        let favorites = if filter.only_favorites {
            self.favorites()
        } else {
            Vec::new()
        };
        browse(&self.listings(), &favorites, filter)
    }

    pub fn create_listing(&self, input: NewListing) -> Result<Listing, BoardError> {
        let listing = input.into_listing(ListingId::generate(), self.owner_id.clone(), Utc::now());
        listing.validate()?;

        let _guard = self.write_guard()?;
        let mut listings = self.listings();
        listings.insert(0, listing.clone());
        save_collection(&self.store, StoreKey::Listings, &listings)?;

        info!(listing_id = %listing.id, title = %listing.title, "listing created");
        Ok(listing)
    }

    pub fn update_listing(&self, id: &ListingId, patch: &ListingPatch) -> Result<Listing, BoardError> {
        let _guard = self.write_guard()?;
        let mut listings = self.listings();
        let index = listings
            .iter()
            .position(|listing| &listing.id == id)
            .ok_or_else(|| BoardError::listing_not_found(id))?;

        let next = merge_listing(&listings[index], patch);
        next.validate()?;

        listings[index] = next.clone();
        save_collection(&self.store, StoreKey::Listings, &listings)?;

        info!(listing_id = %id, "listing updated");
        Ok(next)
    }

    /// Remove a listing and every application that references it.
    ///
    /// Both collections go through one `set_many` call, listings first. Stores without
    /// multi-key atomicity can leave orphaned applications if interrupted between the two
    /// writes; `sweep_orphaned_applications` repairs that.
    pub fn delete_listing(&self, id: &ListingId) -> Result<DeleteOutcome, BoardError> {
        let _guard = self.write_guard()?;
        let mut listings = self.listings();
        let index = listings
            .iter()
            .position(|listing| &listing.id == id)
            .ok_or_else(|| BoardError::listing_not_found(id))?;
        let removed = listings.remove(index);

        let applications = self.applications();
        let before = applications.len();
        let remaining: Vec<Application> = applications
            .into_iter()
            .filter(|application| &application.listing_id != id)
            .collect();
        let removed_applications = before - remaining.len();

        self.store.set_many(vec![
            (StoreKey::Listings, encode_collection(StoreKey::Listings, &listings)?),
            (
                StoreKey::Applications,
                encode_collection(StoreKey::Applications, &remaining)?,
            ),
        ])?;

        info!(listing_id = %id, removed_applications, "listing deleted");
        Ok(DeleteOutcome {
            listing: removed,
            removed_applications,
        })
    }

    pub fn toggle_listing_status(&self, id: &ListingId) -> Result<Listing, BoardError> {
        let _guard = self.write_guard()?;
        let mut listings = self.listings();
        let listing = listings
            .iter_mut()
            .find(|listing| &listing.id == id)
            .ok_or_else(|| BoardError::listing_not_found(id))?;

        let next = Listing {
            status: listing.status.toggled(),
            ..listing.clone()
        };
        *listing = next.clone();
        save_collection(&self.store, StoreKey::Listings, &listings)?;

        info!(listing_id = %id, status = next.status.label(), "listing status toggled");
        Ok(next)
    }

    pub fn create_application(&self, input: NewApplication) -> Result<Application, BoardError> {
        if input.name.trim().is_empty() {
            return Err(ValidationError::NameRequired.into());
        }

        let _guard = self.write_guard()?;
        if !self.listings().iter().any(|listing| listing.id == input.listing_id) {
            return Err(BoardError::listing_not_found(&input.listing_id));
        }

        let application = input.into_application(ApplicationId::generate(), Utc::now());
        let mut applications = self.applications();
        applications.insert(0, application.clone());
        save_collection(&self.store, StoreKey::Applications, &applications)?;

        info!(
            application_id = %application.id,
            listing_id = %application.listing_id,
            "application received"
        );
        Ok(application)
    }

    pub fn set_application_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, BoardError> {
        let _guard = self.write_guard()?;
        let mut applications = self.applications();
        let application = applications
            .iter_mut()
            .find(|application| &application.id == id)
            .ok_or_else(|| BoardError::application_not_found(id))?;

        let next = Application {
            status,
            ..application.clone()
        };
        *application = next.clone();
        save_collection(&self.store, StoreKey::Applications, &applications)?;

        info!(application_id = %id, status = status.label(), "application status set");
        Ok(next)
    }

    /// Flip a listing in or out of favorites. Returns whether it is now a favorite.
    pub fn toggle_favorite(&self, id: &ListingId) -> Result<bool, BoardError> {
        let _guard = self.write_guard()?;
        let mut favorites = self.favorites();

        let favorited = match favorites.iter().position(|favorite| favorite == id) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                if !self.listings().iter().any(|listing| &listing.id == id) {
                    return Err(BoardError::listing_not_found(id));
                }
                favorites.push(id.clone());
                true
            }
        };

        save_collection(&self.store, StoreKey::Favorites, &favorites)?;
        debug!(listing_id = %id, favorited, "favorite toggled");
        Ok(favorited)
    }

    /// Store `listings` only when no listings exist yet. Returns how many were written.
    pub fn seed_if_empty(&self, listings: Vec<Listing>) -> Result<usize, BoardError> {
        let _guard = self.write_guard()?;
        if !self.listings().is_empty() {
            debug!("listings present, skipping seed");
            return Ok(0);
        }
        for listing in &listings {
            listing.validate()?;
        }

        save_collection(&self.store, StoreKey::Listings, &listings)?;
        info!(count = listings.len(), "seeded listings");
        Ok(listings.len())
    }

    /// Drop applications whose listing no longer exists. Never run implicitly.
    pub fn sweep_orphaned_applications(&self) -> Result<usize, BoardError> {
        let _guard = self.write_guard()?;
        let listings = self.listings();
        let applications = self.applications();
        let before = applications.len();

        let kept: Vec<Application> = applications
            .into_iter()
            .filter(|application| listings.iter().any(|listing| listing.id == application.listing_id))
            .collect();
        let removed = before - kept.len();

        if removed > 0 {
            save_collection(&self.store, StoreKey::Applications, &kept)?;
            warn!(removed, "removed orphaned applications");
        }
        Ok(removed)
    }
}
