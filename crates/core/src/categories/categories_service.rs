use log::debug;
use std::sync::Arc;

use super::categories_model::{Category, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing product categories
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self) -> Result<Vec<Category>> {
        self.repository.load_categories()
    }

    fn get_category(&self, category_id: &str) -> Result<Category> {
        self.repository
            .find_by_id(category_id)?
            .ok_or_else(|| Error::NotFound("Category with this id not found".to_string()))
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        if self.repository.find_by_name(&new_category.name)?.is_some() {
            return Err(Error::Conflict(
                "Category with this name already exists".to_string(),
            ));
        }
        debug!("Creating category {}", new_category.name);
        self.repository.insert(new_category).await
    }

    async fn update_category(&self, category: Category) -> Result<Category> {
        let existing = self.get_category(&category.id)?;
        if let Some(same_name) = self.repository.find_by_name(&category.name)? {
            if same_name.id != existing.id {
                return Err(Error::Conflict(
                    "Category with this name already exists".to_string(),
                ));
            }
        }
        self.repository.update(category).await
    }

    async fn delete_category(&self, category_id: String) -> Result<()> {
        self.get_category(&category_id)?;
        self.repository.delete(category_id).await?;
        Ok(())
    }
}
