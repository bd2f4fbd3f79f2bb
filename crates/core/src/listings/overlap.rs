//! Overlap validation for price listings.
//!
//! Two listings for the same (product, marketplace) pair must not cover a
//! shared day. Ranges are half-open, so a listing ending on the day another
//! one starts is adjacent, not overlapping.

use chrono::NaiveDate;

use super::listings_model::{Listing, NewListing};
use crate::errors::{Error, Result};

/// Returns true when the candidate range conflicts with the existing range.
///
/// The candidate does NOT conflict iff it lies entirely before the existing
/// range (its end may touch the existing start) or entirely after it (its
/// start may touch the existing end). This is the predicate the stored data
/// was validated under; keep its boundary behavior exactly.
pub fn ranges_conflict(
    candidate_start: NaiveDate,
    candidate_end: NaiveDate,
    existing_start: NaiveDate,
    existing_end: NaiveDate,
) -> bool {
    let before = candidate_start < existing_start && candidate_end <= existing_start;
    let after = candidate_start >= existing_end && candidate_end > existing_end;
    !(before || after)
}

/// Checks a candidate listing against every existing listing for the same
/// product, returning a conflict error on the first overlap.
pub fn check_no_overlap(candidate: &NewListing, existing: &[Listing]) -> Result<()> {
    for listing in existing {
        if listing.product_id != candidate.product_id {
            continue;
        }
        if ranges_conflict(
            candidate.date_start,
            candidate.date_end,
            listing.date_start,
            listing.date_end,
        ) {
            return Err(Error::Conflict(
                "Listing for this period already exists".to_string(),
            ));
        }
    }
    Ok(())
}
