//! Warranty status classification.
//!
//! A warranty's status is never stored -- it is always recomputed from its
//! end date and a caller-supplied `now`. There is no persisted status column
//! to go stale, so the only "transition" a warranty ever makes is the clock
//! crossing its expiry instant or the 30-day warning boundary.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Number of days before expiry at which a warranty counts as expiring.
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 86_400;

/// Status of a single warranty relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarrantyStatus {
    /// More than [`EXPIRING_WINDOW_DAYS`] days of coverage remain.
    Active,
    /// Coverage ends within [`EXPIRING_WINDOW_DAYS`] days (inclusive).
    Expiring,
    /// The end instant has passed.
    Expired,
}

/// Overall status of a product derived from its warranties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Expiring,
    Expired,
    /// The product has no warranties to derive a status from.
    Unknown,
}

impl From<WarrantyStatus> for ProductStatus {
    fn from(status: WarrantyStatus) -> Self {
        match status {
            WarrantyStatus::Active => ProductStatus::Active,
            WarrantyStatus::Expiring => ProductStatus::Expiring,
            WarrantyStatus::Expired => ProductStatus::Expired,
        }
    }
}

/// Whole days until `end_date`, rounded with a ceiling.
///
/// Rounding rule: any positive fraction of a day counts as a full remaining
/// day, so a warranty ending 30 days and one hour from now reports 31 days.
/// Negative results mean the end instant has already passed (callers that
/// display "N days ago" should take the absolute value).
pub fn days_until_expiration(end_date: Timestamp, now: Timestamp) -> i64 {
    let secs = (end_date - now).num_seconds();
    secs.div_euclid(SECONDS_PER_DAY) + i64::from(secs.rem_euclid(SECONDS_PER_DAY) > 0)
}

/// Classify a warranty's status from its end date and the current instant.
///
/// A warranty strictly past its end instant is expired regardless of
/// fractional-day rounding; otherwise the ceiling day count from
/// [`days_until_expiration`] decides between expiring (<= 30 days, inclusive
/// of a warranty ending today) and active.
///
/// Pure and total: same inputs always produce the same status, and every
/// well-typed input produces one.
pub fn classify(end_date: Timestamp, now: Timestamp) -> WarrantyStatus {
    if end_date < now {
        return WarrantyStatus::Expired;
    }
    if days_until_expiration(end_date, now) <= EXPIRING_WINDOW_DAYS {
        WarrantyStatus::Expiring
    } else {
        WarrantyStatus::Active
    }
}

/// Derive a product's overall status from its warranties' statuses.
///
/// Precedence is worst-wins: if any warranty is expired the product is
/// expired, else if any is expiring the product is expiring, else active.
/// A product with one active and one expired warranty therefore reports
/// expired even though live coverage remains -- deliberate (it surfaces the
/// lapsed coverage), if counterintuitive. Zero warranties yield
/// [`ProductStatus::Unknown`].
pub fn aggregate<I>(statuses: I) -> ProductStatus
where
    I: IntoIterator<Item = WarrantyStatus>,
{
    let mut overall = None;
    for status in statuses {
        overall = Some(match (overall, status) {
            (_, WarrantyStatus::Expired) | (Some(WarrantyStatus::Expired), _) => {
                WarrantyStatus::Expired
            }
            (_, WarrantyStatus::Expiring) | (Some(WarrantyStatus::Expiring), _) => {
                WarrantyStatus::Expiring
            }
            _ => WarrantyStatus::Active,
        });
    }
    overall.map_or(ProductStatus::Unknown, ProductStatus::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn fixed_now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_thirty_one_days_out_is_active() {
        let now = fixed_now();
        assert_eq!(classify(now + Duration::days(31), now), WarrantyStatus::Active);
    }

    #[test]
    fn test_thirty_days_out_is_expiring() {
        let now = fixed_now();
        assert_eq!(
            classify(now + Duration::days(30), now),
            WarrantyStatus::Expiring
        );
    }

    #[test]
    fn test_ending_today_is_expiring() {
        let now = fixed_now();
        assert_eq!(classify(now, now), WarrantyStatus::Expiring);
        assert_eq!(
            classify(now + Duration::seconds(1), now),
            WarrantyStatus::Expiring
        );
    }

    #[test]
    fn test_one_second_past_is_expired() {
        let now = fixed_now();
        assert_eq!(
            classify(now - Duration::seconds(1), now),
            WarrantyStatus::Expired
        );
    }

    #[test]
    fn test_expired_regardless_of_magnitude() {
        let now = fixed_now();
        assert_eq!(classify(now - Duration::days(1), now), WarrantyStatus::Expired);
        assert_eq!(
            classify(now - Duration::days(3650), now),
            WarrantyStatus::Expired
        );
    }

    #[test]
    fn test_ceiling_counts_partial_days() {
        let now = fixed_now();
        // 30 days + 1 hour rounds up to 31 remaining days.
        let end = now + Duration::days(30) + Duration::hours(1);
        assert_eq!(days_until_expiration(end, now), 31);
        assert_eq!(classify(end, now), WarrantyStatus::Active);

        // Exactly 30 days is not rounded.
        assert_eq!(days_until_expiration(now + Duration::days(30), now), 30);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let now = fixed_now();
        let end = now + Duration::days(10);
        assert_eq!(classify(end, now), classify(end, now));
    }

    #[test]
    fn test_aggregate_empty_is_unknown() {
        assert_eq!(aggregate([]), ProductStatus::Unknown);
    }

    #[test]
    fn test_aggregate_precedence() {
        use WarrantyStatus::{Active, Expired, Expiring};

        assert_eq!(aggregate([Active, Expiring]), ProductStatus::Expiring);
        assert_eq!(aggregate([Active, Expired]), ProductStatus::Expired);
        assert_eq!(aggregate([Active, Active]), ProductStatus::Active);
        assert_eq!(aggregate([Expiring, Expired, Active]), ProductStatus::Expired);
    }

    #[test]
    fn test_aggregate_order_independent() {
        use WarrantyStatus::{Active, Expired, Expiring};

        assert_eq!(
            aggregate([Expired, Expiring, Active]),
            aggregate([Active, Expiring, Expired])
        );
    }
}
