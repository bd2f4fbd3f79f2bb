use log::debug;
use std::sync::Arc;

use super::marketplaces_model::{Marketplace, NewMarketplace};
use super::marketplaces_traits::{MarketplaceRepositoryTrait, MarketplaceServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing marketplaces
pub struct MarketplaceService {
    repository: Arc<dyn MarketplaceRepositoryTrait>,
}

impl MarketplaceService {
    pub fn new(repository: Arc<dyn MarketplaceRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl MarketplaceServiceTrait for MarketplaceService {
    fn get_marketplaces(&self) -> Result<Vec<Marketplace>> {
        self.repository.load_marketplaces()
    }

    fn get_marketplace(&self, marketplace_id: &str) -> Result<Marketplace> {
        self.repository
            .find_by_id(marketplace_id)?
            .ok_or_else(|| Error::NotFound("Marketplace with this id not found".to_string()))
    }

    async fn create_marketplace(&self, new_marketplace: NewMarketplace) -> Result<Marketplace> {
        if self
            .repository
            .find_by_name(&new_marketplace.name)?
            .is_some()
        {
            return Err(Error::Conflict(
                "Marketplace with this name already exists".to_string(),
            ));
        }
        debug!("Creating marketplace {}", new_marketplace.name);
        self.repository.insert(new_marketplace).await
    }

    async fn update_marketplace(&self, marketplace: Marketplace) -> Result<Marketplace> {
        let existing = self.get_marketplace(&marketplace.id)?;
        if let Some(same_name) = self.repository.find_by_name(&marketplace.name)? {
            if same_name.id != existing.id {
                return Err(Error::Conflict(
                    "Marketplace with this name already exists".to_string(),
                ));
            }
        }
        self.repository.update(marketplace).await
    }

    async fn delete_marketplace(&self, marketplace_id: String) -> Result<()> {
        self.get_marketplace(&marketplace_id)?;
        self.repository.delete(marketplace_id).await?;
        Ok(())
    }
}
