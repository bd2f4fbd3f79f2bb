use pricetrack_core::errors::Result;
use pricetrack_core::marketplaces::{Marketplace, MarketplaceRepositoryTrait, NewMarketplace};

use super::model::MarketplaceDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::marketplaces;
use crate::schema::marketplaces::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct MarketplaceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MarketplaceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        MarketplaceRepository { pool, writer }
    }
}

#[async_trait]
impl MarketplaceRepositoryTrait for MarketplaceRepository {
    fn load_marketplaces(&self) -> Result<Vec<Marketplace>> {
        let mut conn = get_connection(&self.pool)?;
        let marketplaces_db = marketplaces
            .order(name.asc())
            .load::<MarketplaceDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(marketplaces_db
            .into_iter()
            .map(Marketplace::from)
            .collect())
    }

    fn find_by_id(&self, marketplace_id: &str) -> Result<Option<Marketplace>> {
        let mut conn = get_connection(&self.pool)?;
        let marketplace_db = marketplaces
            .find(marketplace_id)
            .first::<MarketplaceDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(marketplace_db.map(Marketplace::from))
    }

    fn find_by_name(&self, marketplace_name: &str) -> Result<Option<Marketplace>> {
        let mut conn = get_connection(&self.pool)?;
        let marketplace_db = marketplaces
            .filter(name.eq(marketplace_name))
            .first::<MarketplaceDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(marketplace_db.map(Marketplace::from))
    }

    async fn insert(&self, new_marketplace: NewMarketplace) -> Result<Marketplace> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Marketplace> {
                let marketplace_db =
                    MarketplaceDB::from_new(new_marketplace, Uuid::new_v4().to_string());
                let result_db = diesel::insert_into(marketplaces::table)
                    .values(&marketplace_db)
                    .returning(MarketplaceDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Marketplace::from(result_db))
            })
            .await
    }

    async fn update(&self, marketplace: Marketplace) -> Result<Marketplace> {
        let marketplace_db = MarketplaceDB {
            id: marketplace.id.clone(),
            name: marketplace.name,
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Marketplace> {
                let result_db = diesel::update(marketplaces.find(marketplace_db.id.clone()))
                    .set(&marketplace_db)
                    .returning(MarketplaceDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Marketplace::from(result_db))
            })
            .await
    }

    async fn delete(&self, marketplace_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(marketplaces.find(marketplace_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
