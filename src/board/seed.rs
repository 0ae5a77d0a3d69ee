use chrono::{DateTime, Utc};

use super::domain::{Currency, Listing, ListingId, ListingStatus};

/// Starter listings used to populate an empty board for demos.
pub fn demo_listings(owner_id: &str, now: DateTime<Utc>) -> Vec<Listing> {
    vec![
        Listing {
            id: ListingId::from("l1"),
            owner_id: owner_id.to_string(),
            title: "Kafe için hafta sonu barista".to_string(),
            company_name: None,
            description: Some("Cumartesi-pazar, 10:00-18:00. Deneyim tercih.".to_string()),
            location: Some("Kadıköy, İstanbul".to_string()),
            city: None,
            district: None,
            is_remote: false,
            hourly_rate: Some(220.0),
            currency: Currency::Try,
            start_at: None,
            end_at: None,
            duration_days: None,
            hours_per_day: None,
            required_count: None,
            created_at: now,
            status: ListingStatus::Open,
        },
        Listing {
            id: ListingId::from("l2"),
            owner_id: "other-2".to_string(),
            title: "Etkinlik host/hostes (tek gün)".to_string(),
            company_name: None,
            description: Some("1 Ekim fuar alanı, temel İngilizce.".to_string()),
            location: Some("Beylikdüzü, İstanbul".to_string()),
            city: None,
            district: None,
            is_remote: false,
            hourly_rate: Some(300.0),
            currency: Currency::Try,
            start_at: None,
            end_at: None,
            duration_days: None,
            hours_per_day: None,
            required_count: None,
            created_at: now,
            status: ListingStatus::Open,
        },
    ]
}
