use serde::{Deserialize, Serialize};

/// Lifecycle of a venue application. Advanced exclusively by explicit admin
/// actions; illegal transitions are rejected server-side.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Published,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            "published" => Some(ApplicationStatus::Published),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (ApplicationStatus::Pending, ApplicationStatus::Approved)
                | (ApplicationStatus::Pending, ApplicationStatus::Rejected)
                | (ApplicationStatus::Approved, ApplicationStatus::Published)
        )
    }
}

/// Lifecycle of a pending change to a published venue, and of sponsor
/// applications.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewOutcome {
    Pending,
    Approved,
    Rejected,
}

impl ReviewOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewOutcome::Pending => "pending",
            ReviewOutcome::Approved => "approved",
            ReviewOutcome::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReviewOutcome::Pending),
            "approved" => Some(ReviewOutcome::Approved),
            "rejected" => Some(ReviewOutcome::Rejected),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: ReviewOutcome) -> bool {
        matches!(
            (self, next),
            (ReviewOutcome::Pending, ReviewOutcome::Approved)
                | (ReviewOutcome::Pending, ReviewOutcome::Rejected)
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Owner,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Owner => "owner",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "owner" => Some(Role::Owner),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A published listing. `is_active` gates public visibility while a pending
/// change is open against it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Venue {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub business_type: String,
    pub features: Vec<String>,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
    pub owner_id: Option<i64>,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VenueApplication {
    pub id: i64,
    pub applicant_id: i64,
    pub applicant_name: String,
    pub applicant_email: String,
    pub venue_name: String,
    pub description: String,
    pub business_type: String,
    pub features: Vec<String>,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
    pub status: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VenueReview {
    pub id: i64,
    pub venue_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub rating: i32,
    pub body: String,
    pub is_approved: bool,
    pub created_at: String,
    pub replies: Vec<ReviewReply>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReviewReply {
    pub id: i64,
    pub review_id: i64,
    pub owner_id: i64,
    pub body: String,
    pub created_at: String,
}

/// A field-diff against a published venue awaiting admin re-approval. The
/// venue is deactivated while one is open.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PendingChange {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub changes: serde_json::Value,
    pub status: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Sponsor {
    pub id: i64,
    pub name: String,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SponsorApplication {
    pub id: i64,
    pub name: String,
    pub contact_email: String,
    pub website: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserAccount {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Profile {
    pub user_id: i64,
    pub display_name: String,
    pub pronouns: Option<String>,
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DataRightsRequest {
    pub id: i64,
    pub user_id: i64,
    pub user_email: String,
    pub kind: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ContentPage {
    pub slug: String,
    pub title: String,
    pub body: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SiteSetting {
    pub key: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_status_round_trips() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::Published,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse("archived"), None);
    }

    #[test]
    fn application_status_transitions() {
        use ApplicationStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Published));
        assert!(!Pending.can_transition_to(Published));
        assert!(!Rejected.can_transition_to(Published));
        assert!(!Published.can_transition_to(Pending));
        assert!(!Approved.can_transition_to(Rejected));
    }

    #[test]
    fn review_outcome_transitions() {
        use ReviewOutcome::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
    }

    #[test]
    fn role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("superuser"), None);
    }
}
