//! Role application model
//!
//! A user applies to become a Driver or a Pickup Point operator; an Admin
//! reviews the application. Both roles share one envelope and one status
//! state machine; only the submitted details differ.

use crate::types::{ApplicationId, IdentityId, Timestamp};
use serde::{Deserialize, Serialize};

// =============================================================================
// Status state machine
// =============================================================================

/// Review status shared by both application kinds
///
/// A rejection reason can only exist on the `REJECTED` variant; an approved
/// record cannot carry one by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected { reason: String },
}

impl ApplicationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ApplicationStatus::Pending)
    }

    /// Approved and rejected records are immutable
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    /// The rejection reason, when rejected
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            ApplicationStatus::Rejected { reason } => Some(reason),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected { .. } => "REJECTED",
        };
        write!(f, "{}", name)
    }
}

/// Admin review outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

// =============================================================================
// Role-specific details
// =============================================================================

/// The role an application requests
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationRole {
    Driver,
    PickupPoint,
}

impl std::fmt::Display for ApplicationRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ApplicationRole::Driver => "driver",
            ApplicationRole::PickupPoint => "pickup_point",
        };
        write!(f, "{}", name)
    }
}

/// Driver application evidence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverDetails {
    pub full_name: String,
    pub phone: String,
    pub vehicle_registration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_description: Option<String>,
}

/// Pickup point application evidence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickupPointDetails {
    pub business_name: String,
    pub phone: String,
    pub street_address: String,
    pub suburb: String,
}

/// Role-specific payload, tagged by the requested role
///
/// ```json
/// { "role": "DRIVER", "fields": { "full_name": "...", ... } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "role", content = "fields", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationDetails {
    Driver(DriverDetails),
    PickupPoint(PickupPointDetails),
}

impl ApplicationDetails {
    /// The role this payload applies for
    pub fn role(&self) -> ApplicationRole {
        match self {
            ApplicationDetails::Driver(_) => ApplicationRole::Driver,
            ApplicationDetails::PickupPoint(_) => ApplicationRole::PickupPoint,
        }
    }
}

// =============================================================================
// Application envelope
// =============================================================================

/// A submitted role application
///
/// At most one application per (identity, role) may be pending at a time.
/// Reviewed records are kept for audit; resubmission after rejection creates
/// a fresh pending record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleApplication {
    pub id: ApplicationId,
    pub identity: IdentityId,
    pub details: ApplicationDetails,
    /// Opaque content-addressed references to uploaded documents
    pub document_refs: Vec<String>,
    pub status: ApplicationStatus,
    pub submitted_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<Timestamp>,
}

impl RoleApplication {
    /// The role this application requests
    pub fn role(&self) -> ApplicationRole {
        self.details.role()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_shapes() {
        let pending = serde_json::to_value(&ApplicationStatus::Pending).unwrap();
        assert_eq!(pending, serde_json::json!({"state": "PENDING"}));

        let rejected = serde_json::to_value(&ApplicationStatus::Rejected {
            reason: "incomplete vehicle documents".into(),
        })
        .unwrap();
        assert_eq!(
            rejected,
            serde_json::json!({"state": "REJECTED", "reason": "incomplete vehicle documents"})
        );

        let parsed: ApplicationStatus = serde_json::from_value(rejected).unwrap();
        assert_eq!(
            parsed.rejection_reason(),
            Some("incomplete vehicle documents")
        );
    }

    #[test]
    fn test_reason_only_on_rejected() {
        assert!(ApplicationStatus::Pending.rejection_reason().is_none());
        assert!(ApplicationStatus::Approved.rejection_reason().is_none());
    }

    #[test]
    fn test_terminality() {
        assert!(ApplicationStatus::Pending.is_pending());
        assert!(!ApplicationStatus::Pending.is_terminal());
        assert!(ApplicationStatus::Approved.is_terminal());
        assert!(
            ApplicationStatus::Rejected {
                reason: "no".into()
            }
            .is_terminal()
        );
    }

    #[test]
    fn test_details_tagging() {
        let details = ApplicationDetails::Driver(DriverDetails {
            full_name: "Thabo Mokoena".into(),
            phone: "+27 82 000 0000".into(),
            vehicle_registration: "CA 123-456".into(),
            vehicle_description: None,
        });
        assert_eq!(details.role(), ApplicationRole::Driver);

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["role"], "DRIVER");
        assert_eq!(json["fields"]["full_name"], "Thabo Mokoena");

        let parsed: ApplicationDetails = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, details);
    }
}
