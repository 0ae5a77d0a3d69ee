use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::service::ValidationError;

/// Shortest accepted listing title, counted in characters after trimming.
pub const MIN_TITLE_CHARS: usize = 3;

/// Identifier wrapper for listings. Serialized as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl ListingId {
    pub fn generate() -> Self {
        Self(format!("l_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Posting lifecycle. Only the open/closed toggle is exercised after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Open,
    Closed,
    Draft,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ListingStatus::Open => "open",
            ListingStatus::Closed => "closed",
            ListingStatus::Draft => "draft",
        }
    }

    /// open -> closed, closed -> open; a draft is published as open.
    pub const fn toggled(self) -> Self {
        match self {
            ListingStatus::Open => ListingStatus::Closed,
            ListingStatus::Closed | ListingStatus::Draft => ListingStatus::Open,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "TRY")]
    Try,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Try => "TRY",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TRY" => Ok(Currency::Try),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(format!("unsupported currency '{other}' (expected TRY, USD, EUR or GBP)")),
        }
    }
}

/// A posted job opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub owner_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_per_day: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_count: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub status: ListingStatus,
}

impl Listing {
    pub fn is_open(&self) -> bool {
        self.status == ListingStatus::Open
    }

    /// Location text used by filters: `location`, else the `city, district` join.
    pub fn searchable_location(&self) -> Option<String> {
        if let Some(location) = self.location.as_deref().filter(|value| !value.trim().is_empty()) {
            return Some(location.to_string());
        }
        join_place(self.city.as_deref(), self.district.as_deref())
    }

    pub fn display_location(&self) -> String {
        match self.searchable_location() {
            Some(location) => location,
            None if self.is_remote => "Remote".to_string(),
            None => "unspecified".to_string(),
        }
    }

    pub fn pay_label(&self) -> Option<String> {
        self.hourly_rate
            .map(|rate| format!("{} {}/hour", rate, self.currency.code()))
    }

    pub fn duration_label(&self) -> Option<String> {
        let days = self.duration_days.map(|days| format!("{days} days"));
        let hours = self.hours_per_day.map(|hours| format!("{hours} hours/day"));
        match (days, hours) {
            (Some(days), Some(hours)) => Some(format!("{days} • {hours}")),
            (Some(part), None) | (None, Some(part)) => Some(part),
            (None, None) => None,
        }
    }

    pub fn headline(&self) -> String {
        match &self.company_name {
            Some(company) => format!("{} • {}", self.title, company),
            None => self.title.clone(),
        }
    }

    /// Field rules shared by create and update.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if title.chars().count() < MIN_TITLE_CHARS {
            return Err(ValidationError::TitleTooShort {
                min: MIN_TITLE_CHARS,
            });
        }
        if let Some(rate) = self.hourly_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ValidationError::InvalidRate);
            }
        }
        if !non_negative(self.duration_days) {
            return Err(ValidationError::InvalidDurationDays);
        }
        if !non_negative(self.hours_per_day) {
            return Err(ValidationError::InvalidHoursPerDay);
        }
        if !non_negative(self.required_count) {
            return Err(ValidationError::InvalidRequiredCount);
        }
        if let (Some(start), Some(end)) = (self.start_at, self.end_at) {
            if end < start {
                return Err(ValidationError::ScheduleEndsBeforeStart);
            }
        }
        Ok(())
    }
}

/// Caller-supplied attributes for a new listing; identity and lifecycle are assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_days: Option<f64>,
    #[serde(default)]
    pub hours_per_day: Option<f64>,
    #[serde(default)]
    pub required_count: Option<f64>,
}

impl NewListing {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub(crate) fn into_listing(
        self,
        id: ListingId,
        owner_id: String,
        created_at: DateTime<Utc>,
    ) -> Listing {
        let city = clean(self.city);
        let district = clean(self.district);
        let location = clean(self.location)
            .or_else(|| join_place(city.as_deref(), district.as_deref()));

        Listing {
            id,
            owner_id,
            title: self.title.trim().to_string(),
            company_name: clean(self.company_name),
            description: clean(self.description),
            location,
            city,
            district,
            is_remote: self.is_remote,
            hourly_rate: self.hourly_rate,
            currency: self.currency.unwrap_or_default(),
            start_at: self.start_at,
            end_at: self.end_at,
            duration_days: self.duration_days,
            hours_per_day: self.hours_per_day,
            required_count: self.required_count,
            created_at,
            status: ListingStatus::Open,
        }
    }
}

/// Partial update. `None` leaves a field untouched; for optional attributes
/// `Some(None)` clears the value. Identity, owner, `created_at` and status are not
/// patchable; status only moves through the open/closed toggle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub company_name: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub district: Option<Option<String>>,
    pub is_remote: Option<bool>,
    pub hourly_rate: Option<Option<f64>>,
    pub currency: Option<Currency>,
    pub start_at: Option<Option<DateTime<Utc>>>,
    pub end_at: Option<Option<DateTime<Utc>>>,
    pub duration_days: Option<Option<f64>>,
    pub hours_per_day: Option<Option<f64>>,
    pub required_count: Option<Option<f64>>,
}

impl ListingPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Shallow merge of `patch` over `existing`, producing a new record.
///
/// When the patch moves `city` or `district` without naming a `location`, the location
/// is re-derived from the merged pair.
pub fn merge_listing(existing: &Listing, patch: &ListingPatch) -> Listing {
    let mut next = existing.clone();

    if let Some(title) = &patch.title {
        next.title = title.trim().to_string();
    }
    if let Some(value) = &patch.company_name {
        next.company_name = clean(value.clone());
    }
    if let Some(value) = &patch.description {
        next.description = clean(value.clone());
    }
    if let Some(value) = &patch.city {
        next.city = clean(value.clone());
    }
    if let Some(value) = &patch.district {
        next.district = clean(value.clone());
    }
    match &patch.location {
        Some(value) => next.location = clean(value.clone()),
        None if patch.city.is_some() || patch.district.is_some() => {
            next.location = join_place(next.city.as_deref(), next.district.as_deref());
        }
        None => {}
    }
    if let Some(value) = patch.is_remote {
        next.is_remote = value;
    }
    if let Some(value) = patch.hourly_rate {
        next.hourly_rate = value;
    }
    if let Some(value) = patch.currency {
        next.currency = value;
    }
    if let Some(value) = patch.start_at {
        next.start_at = value;
    }
    if let Some(value) = patch.end_at {
        next.end_at = value;
    }
    if let Some(value) = patch.duration_days {
        next.duration_days = value;
    }
    if let Some(value) = patch.hours_per_day {
        next.hours_per_day = value;
    }
    if let Some(value) = patch.required_count {
        next.required_count = value;
    }
    next
}

fn non_negative(value: Option<f64>) -> bool {
    value.map_or(true, |value| value.is_finite() && value >= 0.0)
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn join_place(city: Option<&str>, district: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [city, district]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
