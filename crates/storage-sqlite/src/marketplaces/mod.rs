mod model;
mod repository;

pub use model::MarketplaceDB;
pub use repository::MarketplaceRepository;
