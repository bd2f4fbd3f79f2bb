use crate::errors::Result;
use crate::products::products_model::{NewProduct, Product};
use async_trait::async_trait;

/// Trait for product repository operations
#[async_trait]
pub trait ProductRepositoryTrait: Send + Sync {
    fn load_products(&self) -> Result<Vec<Product>>;
    fn find_by_id(&self, product_id: &str) -> Result<Option<Product>>;
    fn find_by_name(&self, name: &str) -> Result<Option<Product>>;
    async fn insert(&self, new_product: NewProduct) -> Result<Product>;
    async fn update(&self, product: Product) -> Result<Product>;
    async fn delete(&self, product_id: String) -> Result<usize>;
}

/// Trait for product service operations
#[async_trait]
pub trait ProductServiceTrait: Send + Sync {
    fn get_products(&self) -> Result<Vec<Product>>;
    fn get_product(&self, product_id: &str) -> Result<Product>;
    async fn create_product(&self, new_product: NewProduct) -> Result<Product>;
    async fn update_product(&self, product: Product) -> Result<Product>;
    async fn delete_product(&self, product_id: String) -> Result<()>;
}
