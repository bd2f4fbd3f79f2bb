use chrono::NaiveDate;
use pricetrack_core::errors::Result;
use pricetrack_core::listings::{overlap, Listing, ListingRepositoryTrait, NewListing};

use super::model::ListingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::listings;
use crate::schema::listings::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct ListingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ListingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ListingRepository { pool, writer }
    }
}

fn into_domain(rows: Vec<ListingDB>) -> Vec<Listing> {
    rows.into_iter().map(Listing::from).collect()
}

#[async_trait]
impl ListingRepositoryTrait for ListingRepository {
    fn load_listings(&self) -> Result<Vec<Listing>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = listings
            .order(date_start.asc())
            .load::<ListingDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(into_domain(rows))
    }

    fn find_by_id(&self, listing_id: &str) -> Result<Option<Listing>> {
        let mut conn = get_connection(&self.pool)?;
        let row = listings
            .find(listing_id)
            .first::<ListingDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Listing::from))
    }

    fn find_by_product_and_marketplace(
        &self,
        for_product: &str,
        for_marketplace: &str,
    ) -> Result<Vec<Listing>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = listings
            .filter(product_id.eq(for_product))
            .filter(marketplace_id.eq(for_marketplace))
            .order(date_start.asc())
            .load::<ListingDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(into_domain(rows))
    }

    fn find_by_product_in_range(
        &self,
        for_product: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Listing>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = listings
            .filter(product_id.eq(for_product))
            .filter(date_start.ge(start))
            .filter(date_end.le(end))
            .order(date_start.asc())
            .load::<ListingDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(into_domain(rows))
    }

    fn find_by_product_and_marketplace_in_range(
        &self,
        for_product: &str,
        for_marketplace: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Listing>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = listings
            .filter(product_id.eq(for_product))
            .filter(marketplace_id.eq(for_marketplace))
            .filter(date_start.ge(start))
            .filter(date_end.le(end))
            .order(date_start.asc())
            .load::<ListingDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(into_domain(rows))
    }

    /// Re-checks the overlap rule against the pair's existing listings
    /// inside the write transaction before inserting. The service performs
    /// the same check up front for a fast error path; this one is the
    /// authoritative check under concurrency.
    async fn insert(&self, new_listing: NewListing) -> Result<Listing> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Listing> {
                let existing = listings
                    .filter(product_id.eq(&new_listing.product_id))
                    .filter(marketplace_id.eq(&new_listing.marketplace_id))
                    .order(date_start.asc())
                    .load::<ListingDB>(conn)
                    .map_err(StorageError::from)?;
                overlap::check_no_overlap(&new_listing, &into_domain(existing))?;

                let listing_db = ListingDB::from_new(new_listing, Uuid::new_v4().to_string());
                let result_db = diesel::insert_into(listings::table)
                    .values(&listing_db)
                    .returning(ListingDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Listing::from(result_db))
            })
            .await
    }

    async fn delete(&self, listing_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(listings.find(listing_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
