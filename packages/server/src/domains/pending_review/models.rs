//! The tagged union over the three worklist sources.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::EmployeeId;

/// Which source table an item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Commission,
    Request,
    Warranty,
}

/// Worklist priority, collapsed to three levels.
///
/// Variant order is rank order: `High` sorts before `Medium` sorts before
/// `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Collapse a warranty's raw intake priority to a worklist priority.
    pub fn from_warranty_level(level: &str) -> Self {
        match level {
            "high" | "urgent" | "emergency" => Priority::High,
            "medium" => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

/// The action expected next, and by whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiresAction {
    /// A reviewer needs to act.
    Review,
    /// The original submitter needs to revise.
    Revision,
    /// The original submitter needs to supply information.
    InfoNeeded,
}

/// SLA classification relative to "today".
///
/// Variant order is rank order and drives the primary sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    Overdue,
    DueToday,
    DueTomorrow,
    OnTrack,
}

/// One worklist entry. Produced fresh on every aggregation; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewableItem {
    pub id: uuid::Uuid,
    pub kind: ItemKind,
    pub title: String,
    pub subtitle: String,
    pub status: String,
    pub priority: Priority,
    pub requires_action: RequiresAction,
    /// The SLA clock start: original submission for review items, the
    /// bounce-back date for revision items.
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub rejection_reason: Option<String>,
    pub submitted_by: Option<EmployeeId>,
    /// Business days since the SLA clock started. Computed at query time.
    pub age_days: i64,
    pub sla_due_at: NaiveDate,
    pub sla_status: SlaStatus,
}

impl ReviewableItem {
    /// Three-key sort: SLA rank, then priority rank, then oldest first.
    /// Lexicographic and total, so sorting is deterministic for equal keys.
    pub fn sort_key(&self) -> (SlaStatus, Priority, i64) {
        (self.sla_status, self.priority, -self.age_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sla_rank_order() {
        assert!(SlaStatus::Overdue < SlaStatus::DueToday);
        assert!(SlaStatus::DueToday < SlaStatus::DueTomorrow);
        assert!(SlaStatus::DueTomorrow < SlaStatus::OnTrack);
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
    }

    #[test]
    fn test_warranty_priority_collapse() {
        assert_eq!(Priority::from_warranty_level("high"), Priority::High);
        assert_eq!(Priority::from_warranty_level("urgent"), Priority::High);
        assert_eq!(Priority::from_warranty_level("emergency"), Priority::High);
        assert_eq!(Priority::from_warranty_level("medium"), Priority::Medium);
        assert_eq!(Priority::from_warranty_level("low"), Priority::Low);
        // Unknown levels collapse to low rather than failing.
        assert_eq!(Priority::from_warranty_level("unset"), Priority::Low);
    }
}
