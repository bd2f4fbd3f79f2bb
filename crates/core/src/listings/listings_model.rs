//! Listing domain models and derived report types.
//!
//! A listing is a time-bounded price observation for one product at one
//! marketplace. Its range is half-open: the listing covers every day in
//! `[date_start, date_end)`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Domain model representing a price listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub product_id: String,
    pub marketplace_id: String,
    pub price: i64,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
}

/// Input model for creating a new listing
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub id: Option<String>,
    pub product_id: String,
    pub marketplace_id: String,
    pub price: i64,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
}

/// One point of a reconstructed price timeline. Derived, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayPrice {
    pub date: NaiveDate,
    pub price: i64,
}

/// Per-day price timeline for one product at one marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceTimelineReport {
    pub product_name: String,
    pub marketplace_name: String,
    pub prices: Vec<DayPrice>,
}

/// Per-day, per-marketplace price map for one product.
///
/// The outer map is ordered by date; inner keys are marketplace names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceComparisonReport {
    pub product_name: String,
    pub prices_by_day: BTreeMap<NaiveDate, HashMap<String, i64>>,
}
