use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::board::domain::{Currency, Listing, ListingId, ListingStatus, NewListing};
use crate::board::service::JobBoard;
use crate::storage::{KeyValueStore, MemoryStore, StoreError, StoreKey};

pub(crate) const OWNER: &str = "local-owner-1";

pub(crate) fn rated(id: &str, rate: Option<f64>) -> Listing {
    Listing {
        id: ListingId::from(id),
        owner_id: OWNER.to_string(),
        title: format!("Listing {id}"),
        company_name: None,
        description: None,
        location: None,
        city: None,
        district: None,
        is_remote: false,
        hourly_rate: rate,
        currency: Currency::Try,
        start_at: None,
        end_at: None,
        duration_days: None,
        hours_per_day: None,
        required_count: None,
        created_at: Utc.with_ymd_and_hms(2025, 9, 24, 10, 0, 0).unwrap(),
        status: ListingStatus::Open,
    }
}

/// Four open listings covering every location shape.
pub(crate) fn board_fixture() -> Vec<Listing> {
    let barista = Listing {
        title: "Kafe için hafta sonu barista".to_string(),
        description: Some("Cumartesi-pazar, 10:00-18:00.".to_string()),
        location: Some("Kadıköy, İstanbul".to_string()),
        ..rated("barista", Some(220.0))
    };
    let host = Listing {
        title: "Etkinlik host/hostes (tek gün)".to_string(),
        description: Some("1 Ekim fuar alanı, temel İngilizce.".to_string()),
        location: Some("Beylikdüzü, İstanbul".to_string()),
        owner_id: "other-2".to_string(),
        ..rated("host", Some(300.0))
    };
    let stockroom = Listing {
        title: "Depo sayım elemanı".to_string(),
        city: Some("İstanbul".to_string()),
        district: Some("Kadıköy".to_string()),
        ..rated("kadikoy-city", Some(180.0))
    };
    let survey = Listing {
        title: "Online anket girişi".to_string(),
        is_remote: true,
        ..rated("remote", None)
    };
    vec![barista, host, stockroom, survey]
}

pub(crate) fn new_listing(title: &str, rate: Option<f64>) -> NewListing {
    NewListing {
        title: title.to_string(),
        hourly_rate: rate,
        city: Some("İstanbul".to_string()),
        district: Some("Kadıköy".to_string()),
        ..NewListing::default()
    }
}

pub(crate) fn build_board() -> (JobBoard<Arc<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let board = JobBoard::new(store.clone(), OWNER);
    (board, store)
}

/// Reads from an inner store; rejects writes to one key.
pub(crate) struct ReadOnlyKey {
    pub(crate) inner: MemoryStore,
    pub(crate) locked: StoreKey,
}

impl KeyValueStore for ReadOnlyKey {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: StoreKey, value: String) -> Result<(), StoreError> {
        if key == self.locked {
            return Err(StoreError::Unavailable(format!("{} is read only", key.as_str())));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}
