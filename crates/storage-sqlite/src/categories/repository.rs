use pricetrack_core::categories::{Category, CategoryRepositoryTrait, NewCategory};
use pricetrack_core::errors::Result;

use super::model::CategoryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::categories;
use crate::schema::categories::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn load_categories(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let categories_db = categories
            .order(name.asc())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(categories_db.into_iter().map(Category::from).collect())
    }

    fn find_by_id(&self, category_id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let category_db = categories
            .find(category_id)
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(category_db.map(Category::from))
    }

    fn find_by_name(&self, category_name: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let category_db = categories
            .filter(name.eq(category_name))
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(category_db.map(Category::from))
    }

    async fn insert(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let category_db =
                    CategoryDB::from_new(new_category, Uuid::new_v4().to_string());
                let result_db = diesel::insert_into(categories::table)
                    .values(&category_db)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(result_db))
            })
            .await
    }

    async fn update(&self, category: Category) -> Result<Category> {
        let category_db = CategoryDB {
            id: category.id.clone(),
            name: category.name,
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let result_db = diesel::update(categories.find(category_db.id.clone()))
                    .set(&category_db)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(result_db))
            })
            .await
    }

    async fn delete(&self, category_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(categories.find(category_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
