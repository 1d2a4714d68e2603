//! Business-day arithmetic and the SLA allowance table.
//!
//! Business days are Monday through Friday. There is no holiday calendar;
//! a submission on Thanksgiving ages like any other Thursday. All
//! classification happens at day granularity: timestamps are truncated to
//! their UTC date before comparison.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::domains::pending_review::models::{ItemKind, RequiresAction, SlaStatus};

fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Business days from `from` to `to` (exclusive of `from`, inclusive of
/// `to`). Returns a negative count when `to` precedes `from`.
pub fn business_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    if to < from {
        return -business_days_between(to, from);
    }
    let mut count = 0;
    let mut day = from;
    while day < to {
        day = day.succ_opt().expect("date overflow");
        if is_business_day(day) {
            count += 1;
        }
    }
    count
}

/// Advance `from` by `days` business days. Weekend start dates roll forward
/// to the next weekday first, so `add_business_days(sat, 1)` is Monday.
pub fn add_business_days(from: NaiveDate, days: i64) -> NaiveDate {
    let mut day = from;
    let mut remaining = days;
    while remaining > 0 {
        day = day.checked_add_days(Days::new(1)).expect("date overflow");
        if is_business_day(day) {
            remaining -= 1;
        }
    }
    day
}

/// The allowance table, keyed by `(kind, requires_action)`.
///
/// Every pair the aggregator can produce has an entry; the generic-request
/// review window doubles as the documented default.
pub fn allowance_for(kind: ItemKind, action: RequiresAction) -> i64 {
    match (kind, action) {
        (_, RequiresAction::Revision) | (_, RequiresAction::InfoNeeded) => 3,
        (ItemKind::Commission, RequiresAction::Review) => 2,
        (ItemKind::Request, RequiresAction::Review) => 2,
        (ItemKind::Warranty, RequiresAction::Review) => 1,
    }
}

/// Classify a due date against today. Both sides are dates, so an item due
/// at any time today is `DueToday`, never `Overdue`.
pub fn sla_status_for(due: NaiveDate, today: NaiveDate) -> SlaStatus {
    if due < today {
        SlaStatus::Overdue
    } else if due == today {
        SlaStatus::DueToday
    } else if due == today.succ_opt().expect("date overflow") {
        SlaStatus::DueTomorrow
    } else {
        SlaStatus::OnTrack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2026-08-05 is a Wednesday.
    const WED: (i32, u32, u32) = (2026, 8, 5);

    #[test]
    fn test_business_days_between_same_day() {
        let wed = date(WED.0, WED.1, WED.2);
        assert_eq!(business_days_between(wed, wed), 0);
    }

    #[test]
    fn test_business_days_between_within_week() {
        let mon = date(2026, 8, 3);
        let wed = date(2026, 8, 5);
        assert_eq!(business_days_between(mon, wed), 2);
    }

    #[test]
    fn test_business_days_between_skips_weekend() {
        let fri = date(2026, 8, 7);
        let mon = date(2026, 8, 10);
        assert_eq!(business_days_between(fri, mon), 1);

        let thu = date(2026, 8, 6);
        let tue = date(2026, 8, 11);
        assert_eq!(business_days_between(thu, tue), 3);
    }

    #[test]
    fn test_business_days_between_negative() {
        let mon = date(2026, 8, 3);
        let wed = date(2026, 8, 5);
        assert_eq!(business_days_between(wed, mon), -2);
    }

    #[test]
    fn test_add_business_days_within_week() {
        let mon = date(2026, 8, 3);
        assert_eq!(add_business_days(mon, 2), date(2026, 8, 5));
    }

    #[test]
    fn test_add_business_days_over_weekend() {
        let fri = date(2026, 8, 7);
        assert_eq!(add_business_days(fri, 1), date(2026, 8, 10)); // Monday
        assert_eq!(add_business_days(fri, 3), date(2026, 8, 12));
    }

    #[test]
    fn test_add_business_days_from_weekend() {
        let sat = date(2026, 8, 8);
        assert_eq!(add_business_days(sat, 1), date(2026, 8, 10)); // Monday
    }

    #[test]
    fn test_add_business_days_zero() {
        let wed = date(WED.0, WED.1, WED.2);
        assert_eq!(add_business_days(wed, 0), wed);
    }

    #[test]
    fn test_add_then_between_roundtrip() {
        let mon = date(2026, 8, 3);
        for n in 0..15 {
            let due = add_business_days(mon, n);
            assert_eq!(business_days_between(mon, due), n, "n = {}", n);
        }
    }

    #[test]
    fn test_allowance_table_is_total() {
        for kind in [ItemKind::Commission, ItemKind::Request, ItemKind::Warranty] {
            for action in [
                RequiresAction::Review,
                RequiresAction::Revision,
                RequiresAction::InfoNeeded,
            ] {
                assert!(allowance_for(kind, action) > 0);
            }
        }
    }

    #[test]
    fn test_allowance_values() {
        assert_eq!(allowance_for(ItemKind::Commission, RequiresAction::Review), 2);
        assert_eq!(allowance_for(ItemKind::Request, RequiresAction::Review), 2);
        assert_eq!(allowance_for(ItemKind::Warranty, RequiresAction::Review), 1);
        assert_eq!(allowance_for(ItemKind::Commission, RequiresAction::Revision), 3);
        assert_eq!(allowance_for(ItemKind::Request, RequiresAction::InfoNeeded), 3);
    }

    #[test]
    fn test_sla_status_boundaries() {
        let today = date(2026, 8, 5);
        assert_eq!(sla_status_for(date(2026, 8, 4), today), SlaStatus::Overdue);
        // Due exactly today is DueToday, never Overdue or OnTrack.
        assert_eq!(sla_status_for(today, today), SlaStatus::DueToday);
        assert_eq!(sla_status_for(date(2026, 8, 6), today), SlaStatus::DueTomorrow);
        assert_eq!(sla_status_for(date(2026, 8, 7), today), SlaStatus::OnTrack);
    }

    #[test]
    fn test_sla_status_tomorrow_is_calendar_tomorrow() {
        // Friday: Monday is the next business day but not calendar tomorrow,
        // so a Monday due date is OnTrack on Friday.
        let friday = date(2026, 8, 7);
        assert_eq!(
            sla_status_for(date(2026, 8, 10), friday),
            SlaStatus::OnTrack
        );
        assert_eq!(
            sla_status_for(date(2026, 8, 8), friday),
            SlaStatus::DueTomorrow
        );
    }
}
