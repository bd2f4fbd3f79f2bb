use log::debug;
use std::sync::Arc;

use super::products_model::{NewProduct, Product};
use super::products_traits::{ProductRepositoryTrait, ProductServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::errors::{Error, Result};

/// Service for managing products
pub struct ProductService {
    repository: Arc<dyn ProductRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

impl ProductService {
    pub fn new(
        repository: Arc<dyn ProductRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            category_repository,
        }
    }

    fn resolve_category(&self, category_id: Option<&str>) -> Result<()> {
        if let Some(category_id) = category_id {
            self.category_repository
                .find_by_id(category_id)?
                .ok_or_else(|| Error::NotFound("Category with this id not found".to_string()))?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProductServiceTrait for ProductService {
    fn get_products(&self) -> Result<Vec<Product>> {
        self.repository.load_products()
    }

    fn get_product(&self, product_id: &str) -> Result<Product> {
        self.repository
            .find_by_id(product_id)?
            .ok_or_else(|| Error::NotFound("Product with this id not found".to_string()))
    }

    async fn create_product(&self, new_product: NewProduct) -> Result<Product> {
        if self.repository.find_by_name(&new_product.name)?.is_some() {
            return Err(Error::Conflict(
                "Product with this name already exists".to_string(),
            ));
        }
        self.resolve_category(new_product.category_id.as_deref())?;
        debug!("Creating product {}", new_product.name);
        self.repository.insert(new_product).await
    }

    async fn update_product(&self, product: Product) -> Result<Product> {
        let existing = self.get_product(&product.id)?;
        if let Some(same_name) = self.repository.find_by_name(&product.name)? {
            if same_name.id != existing.id {
                return Err(Error::Conflict(
                    "Product with this name already exists".to_string(),
                ));
            }
        }
        self.resolve_category(product.category_id.as_deref())?;
        self.repository.update(product).await
    }

    async fn delete_product(&self, product_id: String) -> Result<()> {
        self.get_product(&product_id)?;
        self.repository.delete(product_id).await?;
        Ok(())
    }
}
