//! Listings module - price listings, overlap validation, and the
//! price-dynamic / price-comparison reports.

mod listings_model;
mod listings_service;
#[cfg(test)]
mod listings_service_tests;
mod listings_traits;
pub mod overlap;
pub mod timeline;

pub use listings_model::{
    DayPrice, Listing, NewListing, PriceComparisonReport, PriceTimelineReport,
};
pub use listings_service::ListingService;
pub use listings_traits::{ListingRepositoryTrait, ListingServiceTrait};
