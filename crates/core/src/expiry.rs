//! Expiry-ordered views over warranty collections.
//!
//! Produces the "what expires next" sequence used by both the per-product
//! detail view and the whole-account dashboard summary -- same computation,
//! different input scope. The view is rebuilt on every call (the meaning of
//! `now` shifts with the clock, so there is nothing safe to cache).

use crate::status::{classify, WarrantyStatus};
use crate::types::Timestamp;

/// Non-expired items ordered by soonest expiration first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingExpirations<T> {
    /// Items whose status is not expired, ascending by end date. Items with
    /// equal end dates keep their original input order.
    pub ordered: Vec<T>,
}

impl<T> UpcomingExpirations<T> {
    /// The item expiring soonest, or `None` when nothing unexpired remains.
    pub fn next_expiring(&self) -> Option<&T> {
        self.ordered.first()
    }
}

/// Build the upcoming-expirations view for any item type with an end date.
///
/// Expired items are dropped; the rest are sorted ascending by end date.
/// The sort is stable, so items sharing an end date never reorder between
/// calls with the same input.
pub fn upcoming<T, F>(items: Vec<T>, end_date: F, now: Timestamp) -> UpcomingExpirations<T>
where
    F: Fn(&T) -> Timestamp,
{
    let mut ordered: Vec<T> = items
        .into_iter()
        .filter(|item| classify(end_date(item), now) != WarrantyStatus::Expired)
        .collect();
    ordered.sort_by_key(|item| end_date(item));
    UpcomingExpirations { ordered }
}
