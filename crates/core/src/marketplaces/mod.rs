//! Marketplaces module - domain models, services, and traits.

mod marketplaces_model;
mod marketplaces_service;
mod marketplaces_traits;

pub use marketplaces_model::{Marketplace, NewMarketplace};
pub use marketplaces_service::MarketplaceService;
pub use marketplaces_traits::{MarketplaceRepositoryTrait, MarketplaceServiceTrait};
