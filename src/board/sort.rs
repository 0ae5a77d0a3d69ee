use std::cmp::Ordering;
use std::str::FromStr;

use super::domain::Listing;

/// Direction for ordering by hourly rate. Listings default to highest pay first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub const fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{other}' (expected asc or desc)")),
        }
    }
}

/// A missing rate sorts as +inf ascending and -inf descending, so it is always last.
fn rate_key(listing: &Listing, order: SortOrder) -> f64 {
    match (listing.hourly_rate, order) {
        (Some(rate), _) => rate,
        (None, SortOrder::Asc) => f64::INFINITY,
        (None, SortOrder::Desc) => f64::NEG_INFINITY,
    }
}

fn compare(a: &Listing, b: &Listing, order: SortOrder) -> Ordering {
    let (a, b) = (rate_key(a, order), rate_key(b, order));
    match order {
        SortOrder::Asc => a.total_cmp(&b),
        SortOrder::Desc => b.total_cmp(&a),
    }
}

/// Stable in-place ordering by hourly rate; equal rates keep their input order.
pub fn sort_listings(listings: &mut [Listing], order: SortOrder) {
    listings.sort_by(|a, b| compare(a, b, order));
}

pub fn sort_by_rate(mut listings: Vec<Listing>, order: SortOrder) -> Vec<Listing> {
    sort_listings(&mut listings, order);
    listings
}
