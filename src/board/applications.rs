use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::ListingId;

/// Identifier wrapper for applications. Serialized as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn generate() -> Self {
        Self(format!("a_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Review state. Any transition between the three values is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!(
                "unknown application status '{other}' (expected pending, accepted or rejected)"
            )),
        }
    }
}

/// A candidate's response to a listing. `listing_id` is a plain reference, not ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub listing_id: ListingId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Applicant-supplied fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub listing_id: ListingId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewApplication {
    pub fn new(listing_id: ListingId, name: impl Into<String>) -> Self {
        Self {
            listing_id,
            name: name.into(),
            phone: None,
            note: None,
        }
    }

    pub(crate) fn into_application(self, id: ApplicationId, created_at: DateTime<Utc>) -> Application {
        Application {
            id,
            listing_id: self.listing_id,
            name: self.name.trim().to_string(),
            phone: trimmed(self.phone),
            note: trimmed(self.note),
            status: ApplicationStatus::Pending,
            created_at,
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_application_trims_and_starts_pending() {
        let application = NewApplication {
            listing_id: ListingId::from("l1"),
            name: "  Ayşe Yılmaz ".to_string(),
            phone: Some("   ".to_string()),
            note: Some(" available weekends ".to_string()),
        }
        .into_application(ApplicationId::from("a1"), Utc::now());

        assert_eq!(application.name, "Ayşe Yılmaz");
        assert_eq!(application.phone, None);
        assert_eq!(application.note.as_deref(), Some("available weekends"));
        assert_eq!(application.status, ApplicationStatus::Pending);
    }

    #[test]
    fn status_round_trips_through_labels() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(status.label().parse::<ApplicationStatus>(), Ok(status));
        }
        assert!("hired".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn generated_ids_are_prefixed_and_unique() {
        let first = ApplicationId::generate();
        let second = ApplicationId::generate();
        assert!(first.as_str().starts_with("a_"));
        assert_ne!(first, second);
    }
}
