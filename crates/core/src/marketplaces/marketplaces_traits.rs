use crate::errors::Result;
use crate::marketplaces::marketplaces_model::{Marketplace, NewMarketplace};
use async_trait::async_trait;

/// Trait for marketplace repository operations
#[async_trait]
pub trait MarketplaceRepositoryTrait: Send + Sync {
    fn load_marketplaces(&self) -> Result<Vec<Marketplace>>;
    fn find_by_id(&self, marketplace_id: &str) -> Result<Option<Marketplace>>;
    fn find_by_name(&self, name: &str) -> Result<Option<Marketplace>>;
    async fn insert(&self, new_marketplace: NewMarketplace) -> Result<Marketplace>;
    async fn update(&self, marketplace: Marketplace) -> Result<Marketplace>;
    async fn delete(&self, marketplace_id: String) -> Result<usize>;
}

/// Trait for marketplace service operations
#[async_trait]
pub trait MarketplaceServiceTrait: Send + Sync {
    fn get_marketplaces(&self) -> Result<Vec<Marketplace>>;
    fn get_marketplace(&self, marketplace_id: &str) -> Result<Marketplace>;
    async fn create_marketplace(&self, new_marketplace: NewMarketplace) -> Result<Marketplace>;
    async fn update_marketplace(&self, marketplace: Marketplace) -> Result<Marketplace>;
    async fn delete_marketplace(&self, marketplace_id: String) -> Result<()>;
}
