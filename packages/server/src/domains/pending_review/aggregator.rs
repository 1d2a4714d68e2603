//! Role strategies, merge, sort, and counts.
//!
//! Two pure strategies keyed off the caller's role: reviewers see everything
//! waiting on a reviewer, standard users see only their own items waiting on
//! them. A reviewer who is also the submitter of a bounced item sees it in
//! neither strategy; that matches the portal this replaced and is documented
//! rather than special-cased.

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::common::{AppState, EmployeeId};
use crate::domains::pending_review::models::{ItemKind, ReviewableItem};
use crate::domains::pending_review::sources;

/// Per-type tallies over the final item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewCounts {
    pub commissions: i32,
    pub requests: i32,
    pub warranties: i32,
    pub total: i32,
}

/// The aggregation result: one sorted worklist plus tallies.
#[derive(Debug, Clone, Default)]
pub struct PendingReview {
    pub items: Vec<ReviewableItem>,
    pub counts: ReviewCounts,
}

impl PendingReview {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Aggregate the worklist for the given caller.
///
/// No caller means an empty result, not an error. Any source-query failure
/// fails the whole aggregation; there is no partial merge.
pub async fn aggregate(state: &AppState, today: NaiveDate, pool: &PgPool) -> Result<PendingReview> {
    let Some(employee_id) = state.employee_id else {
        return Ok(PendingReview::empty());
    };

    let items = if state.is_reviewer() {
        reviewer_worklist(today, pool).await?
    } else {
        submitter_worklist(employee_id, today, pool).await?
    };

    Ok(finalize(items))
}

/// The reviewer snapshot used by the ops dashboard poller: everything
/// waiting on any reviewer, independent of a specific caller.
pub async fn aggregate_for_dashboard(today: NaiveDate, pool: &PgPool) -> Result<PendingReview> {
    Ok(finalize(reviewer_worklist(today, pool).await?))
}

/// Reviewer strategy: three bounded source queries, dispatched concurrently
/// and joined. The sources are independent; the join is the only barrier.
async fn reviewer_worklist(today: NaiveDate, pool: &PgPool) -> Result<Vec<ReviewableItem>> {
    let (commissions, requests, warranties) = tokio::try_join!(
        sources::fetch_commissions_for_review(pool),
        sources::fetch_requests_for_review(pool),
        sources::fetch_open_warranties(pool),
    )?;

    let mut items = Vec::with_capacity(commissions.len() + requests.len() + warranties.len());
    items.extend(commissions.iter().map(|c| sources::map_commission_review(c, today)));
    items.extend(requests.iter().map(|r| sources::map_request_review(r, today)));
    items.extend(warranties.iter().map(|w| sources::map_warranty_review(w, today)));
    Ok(items)
}

/// Standard-user strategy: only the caller's own items that need *their*
/// action next.
async fn submitter_worklist(
    employee_id: EmployeeId,
    today: NaiveDate,
    pool: &PgPool,
) -> Result<Vec<ReviewableItem>> {
    let (commissions, requests) = tokio::try_join!(
        sources::fetch_own_commission_revisions(employee_id, pool),
        sources::fetch_own_returned_requests(employee_id, pool),
    )?;

    let mut items = Vec::with_capacity(commissions.len() + requests.len());
    items.extend(commissions.iter().map(|c| sources::map_commission_revision(c, today)));
    items.extend(requests.iter().map(|r| sources::map_request_returned(r, today)));
    Ok(items)
}

fn finalize(mut items: Vec<ReviewableItem>) -> PendingReview {
    // Counts are order-independent tallies over the merged list.
    let counts = counts_for(&items);
    sort_items(&mut items);
    PendingReview { items, counts }
}

/// Three-key sort: SLA rank, then priority rank, then oldest first. The sort
/// is stable, so equal keys keep their merge order and repeated runs agree.
pub fn sort_items(items: &mut [ReviewableItem]) {
    items.sort_by_key(|item| item.sort_key());
}

pub fn counts_for(items: &[ReviewableItem]) -> ReviewCounts {
    let mut counts = ReviewCounts::default();
    for item in items {
        match item.kind {
            ItemKind::Commission => counts.commissions += 1,
            ItemKind::Request => counts.requests += 1,
            ItemKind::Warranty => counts.warranties += 1,
        }
        counts.total += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::pending_review::models::{Priority, RequiresAction, SlaStatus};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn item(
        kind: ItemKind,
        priority: Priority,
        sla_status: SlaStatus,
        age_days: i64,
    ) -> ReviewableItem {
        let ts = Utc.with_ymd_and_hms(2026, 8, 3, 12, 0, 0).unwrap();
        ReviewableItem {
            id: Uuid::new_v4(),
            kind,
            title: "item".into(),
            subtitle: "sub".into(),
            status: "pending".into(),
            priority,
            requires_action: RequiresAction::Review,
            submitted_at: ts,
            created_at: ts,
            updated_at: ts,
            rejection_reason: None,
            submitted_by: None,
            age_days,
            sla_due_at: ts.date_naive(),
            sla_status,
        }
    }

    #[test]
    fn test_sort_is_lexicographic_over_three_keys() {
        let mut items = vec![
            item(ItemKind::Request, Priority::Low, SlaStatus::OnTrack, 1),
            item(ItemKind::Warranty, Priority::High, SlaStatus::DueToday, 2),
            item(ItemKind::Commission, Priority::High, SlaStatus::Overdue, 1),
            item(ItemKind::Request, Priority::Medium, SlaStatus::Overdue, 9),
            item(ItemKind::Commission, Priority::High, SlaStatus::Overdue, 4),
            item(ItemKind::Warranty, Priority::Medium, SlaStatus::DueTomorrow, 3),
        ];
        sort_items(&mut items);

        for pair in items.windows(2) {
            let a = &pair[0];
            let b = &pair[1];
            assert!(
                (a.sla_status, a.priority, -a.age_days) <= (b.sla_status, b.priority, -b.age_days),
                "sort invariant violated: {:?} before {:?}",
                a.sort_key(),
                b.sort_key()
            );
        }

        // Spot-check the extremes: oldest overdue high first, on-track low last.
        assert_eq!(items[0].sla_status, SlaStatus::Overdue);
        assert_eq!(items[0].priority, Priority::High);
        assert_eq!(items[0].age_days, 4);
        assert_eq!(items.last().unwrap().sla_status, SlaStatus::OnTrack);
    }

    #[test]
    fn test_sort_ties_break_oldest_first() {
        let mut items = vec![
            item(ItemKind::Commission, Priority::High, SlaStatus::Overdue, 2),
            item(ItemKind::Commission, Priority::High, SlaStatus::Overdue, 7),
            item(ItemKind::Commission, Priority::High, SlaStatus::Overdue, 5),
        ];
        sort_items(&mut items);
        let ages: Vec<i64> = items.iter().map(|i| i.age_days).collect();
        assert_eq!(ages, vec![7, 5, 2]);
    }

    #[test]
    fn test_sort_is_deterministic_for_equal_keys() {
        // Stable sort: fully equal keys keep their merge order.
        let a = item(ItemKind::Commission, Priority::High, SlaStatus::DueToday, 3);
        let b = item(ItemKind::Warranty, Priority::High, SlaStatus::DueToday, 3);
        let mut items = vec![a.clone(), b.clone()];
        sort_items(&mut items);
        assert_eq!(items[0].id, a.id);
        assert_eq!(items[1].id, b.id);

        let mut again = vec![a.clone(), b.clone()];
        sort_items(&mut again);
        let ids: Vec<_> = items.iter().map(|i| i.id).collect();
        let ids_again: Vec<_> = again.iter().map(|i| i.id).collect();
        assert_eq!(ids, ids_again);
    }

    #[test]
    fn test_counts_tally_by_kind() {
        let items = vec![
            item(ItemKind::Commission, Priority::High, SlaStatus::Overdue, 1),
            item(ItemKind::Commission, Priority::High, SlaStatus::OnTrack, 1),
            item(ItemKind::Request, Priority::Medium, SlaStatus::DueToday, 1),
            item(ItemKind::Warranty, Priority::Low, SlaStatus::OnTrack, 1),
        ];
        let counts = counts_for(&items);
        assert_eq!(counts.commissions, 2);
        assert_eq!(counts.requests, 1);
        assert_eq!(counts.warranties, 1);
        assert_eq!(counts.total, 4);
    }

    #[test]
    fn test_counts_ignore_order() {
        let mut items = vec![
            item(ItemKind::Warranty, Priority::Low, SlaStatus::OnTrack, 1),
            item(ItemKind::Commission, Priority::High, SlaStatus::Overdue, 5),
            item(ItemKind::Request, Priority::Medium, SlaStatus::DueToday, 2),
        ];
        let before = counts_for(&items);
        sort_items(&mut items);
        assert_eq!(before, counts_for(&items));
    }
}
