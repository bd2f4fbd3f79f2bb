use chrono::NaiveDate;

use crate::errors::Result;
use crate::listings::listings_model::{
    Listing, NewListing, PriceComparisonReport, PriceTimelineReport,
};
use async_trait::async_trait;

/// Trait for listing repository operations.
///
/// `find_by_product_and_marketplace` returns listings ordered by
/// `date_start` ascending; the range queries return listings fully
/// contained in `[start, end)`.
#[async_trait]
pub trait ListingRepositoryTrait: Send + Sync {
    fn load_listings(&self) -> Result<Vec<Listing>>;
    fn find_by_id(&self, listing_id: &str) -> Result<Option<Listing>>;
    fn find_by_product_and_marketplace(
        &self,
        product_id: &str,
        marketplace_id: &str,
    ) -> Result<Vec<Listing>>;
    fn find_by_product_in_range(
        &self,
        product_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Listing>>;
    fn find_by_product_and_marketplace_in_range(
        &self,
        product_id: &str,
        marketplace_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Listing>>;
    /// Inserts a listing. Implementations re-run the overlap check inside
    /// the write transaction so concurrent creates cannot both pass.
    async fn insert(&self, new_listing: NewListing) -> Result<Listing>;
    async fn delete(&self, listing_id: String) -> Result<usize>;
}

/// Trait for listing service operations: lifecycle plus the price reports.
#[async_trait]
pub trait ListingServiceTrait: Send + Sync {
    fn get_listings(&self) -> Result<Vec<Listing>>;
    fn get_listing(&self, listing_id: &str) -> Result<Listing>;
    async fn create_listing(&self, new_listing: NewListing) -> Result<Listing>;
    async fn create_listings(&self, new_listings: Vec<NewListing>) -> Result<Vec<Listing>>;
    async fn delete_listing(&self, listing_id: String) -> Result<()>;

    fn price_dynamic_for_marketplace(
        &self,
        product_id: &str,
        marketplace_id: &str,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<PriceTimelineReport>;
    fn price_dynamic(
        &self,
        product_id: &str,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<Vec<PriceTimelineReport>>;
    fn compare_prices(
        &self,
        product_id: &str,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<PriceComparisonReport>;
    fn compare_prices_all(
        &self,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<Vec<PriceComparisonReport>>;
}
