use pricetrack_core::errors::Result;
use pricetrack_core::products::{NewProduct, Product, ProductRepositoryTrait};

use super::model::ProductDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::products;
use crate::schema::products::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct ProductRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProductRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProductRepository { pool, writer }
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    fn load_products(&self) -> Result<Vec<Product>> {
        let mut conn = get_connection(&self.pool)?;
        let products_db = products
            .order(name.asc())
            .load::<ProductDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(products_db.into_iter().map(Product::from).collect())
    }

    fn find_by_id(&self, product_id: &str) -> Result<Option<Product>> {
        let mut conn = get_connection(&self.pool)?;
        let product_db = products
            .find(product_id)
            .first::<ProductDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(product_db.map(Product::from))
    }

    fn find_by_name(&self, product_name: &str) -> Result<Option<Product>> {
        let mut conn = get_connection(&self.pool)?;
        let product_db = products
            .filter(name.eq(product_name))
            .first::<ProductDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(product_db.map(Product::from))
    }

    async fn insert(&self, new_product: NewProduct) -> Result<Product> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Product> {
                let product_db = ProductDB::from_new(new_product, Uuid::new_v4().to_string());
                let result_db = diesel::insert_into(products::table)
                    .values(&product_db)
                    .returning(ProductDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Product::from(result_db))
            })
            .await
    }

    async fn update(&self, product: Product) -> Result<Product> {
        let product_db = ProductDB {
            id: product.id.clone(),
            name: product.name,
            category_id: product.category_id,
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Product> {
                let result_db = diesel::update(products.find(product_db.id.clone()))
                    .set(&product_db)
                    .returning(ProductDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Product::from(result_db))
            })
            .await
    }

    async fn delete(&self, product_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(products.find(product_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
