//! Pricetrack Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for pricetrack: reference
//! data (categories, products, marketplaces), users, and the price-listing
//! engine (overlap validation, per-day timelines, price-dynamic and
//! price-comparison reports). It is database-agnostic and defines traits
//! that are implemented by the `storage-sqlite` crate.

pub mod categories;
pub mod errors;
pub mod listings;
pub mod marketplaces;
pub mod products;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
