//! Per-day price timeline reconstruction.
//!
//! Expands listings into one `DayPrice` per covered calendar day inside a
//! requested window, and optionally fills gaps between listings with the
//! last observed price ("price holds until the next change").

use chrono::NaiveDate;

use super::listings_model::{DayPrice, Listing};

/// Iterates every date in the half-open range `[start, end)`.
pub fn days_in(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day < end)
}

/// Emits one `DayPrice` per day covered by a listing inside the window.
///
/// Listings are processed in the order given (callers pass them sorted by
/// `date_start` ascending), and no deduplication happens: a day covered by
/// two listings yields two entries, the chronologically later one last.
pub fn build_timeline(
    listings: &[Listing],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<DayPrice> {
    let mut prices = Vec::new();
    for listing in listings {
        for date in days_in(listing.date_start, listing.date_end) {
            if date >= window_start && date < window_end {
                prices.push(DayPrice {
                    date,
                    price: listing.price,
                });
            }
        }
    }
    prices
}

/// Fills interior gaps of an emitted timeline.
///
/// Wherever two consecutive entries are more than one day apart, the missing
/// days are synthesized carrying the earlier entry's price, and the result
/// is re-sorted by date. Days before the first entry or after the last one
/// are never synthesized.
pub fn fill_gaps(mut prices: Vec<DayPrice>) -> Vec<DayPrice> {
    let mut synthesized = Vec::new();
    for pair in prices.windows(2) {
        for date in days_in(pair[0].date, pair[1].date).skip(1) {
            synthesized.push(DayPrice {
                date,
                price: pair[0].price,
            });
        }
    }
    prices.extend(synthesized);
    prices.sort_by_key(|price| price.date);
    prices
}
