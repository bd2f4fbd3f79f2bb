use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;

use super::listings_model::{
    Listing, NewListing, PriceComparisonReport, PriceTimelineReport,
};
use super::listings_traits::{ListingRepositoryTrait, ListingServiceTrait};
use super::{overlap, timeline};
use crate::errors::{Error, Result, ValidationError};
use crate::marketplaces::{Marketplace, MarketplaceRepositoryTrait};
use crate::products::{Product, ProductRepositoryTrait};

/// Service for managing price listings and computing the price reports.
///
/// Creation runs the overlap validator against the existing listings of the
/// same (product, marketplace) pair; the storage layer repeats that check
/// inside its serialized write transaction, so two concurrent creates for
/// the same pair cannot both slip through.
pub struct ListingService {
    repository: Arc<dyn ListingRepositoryTrait>,
    product_repository: Arc<dyn ProductRepositoryTrait>,
    marketplace_repository: Arc<dyn MarketplaceRepositoryTrait>,
}

impl ListingService {
    pub fn new(
        repository: Arc<dyn ListingRepositoryTrait>,
        product_repository: Arc<dyn ProductRepositoryTrait>,
        marketplace_repository: Arc<dyn MarketplaceRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            product_repository,
            marketplace_repository,
        }
    }

    fn resolve_product(&self, product_id: &str) -> Result<Product> {
        self.product_repository
            .find_by_id(product_id)?
            .ok_or_else(|| Error::NotFound("Product with this id not found".to_string()))
    }

    fn resolve_marketplace(&self, marketplace_id: &str) -> Result<Marketplace> {
        self.marketplace_repository
            .find_by_id(marketplace_id)?
            .ok_or_else(|| Error::NotFound("Marketplace with this id not found".to_string()))
    }

    /// Gap-filled timeline for one resolved (product, marketplace) pair.
    /// An empty listing set is an error: the pair has no price history.
    fn dynamic_report(
        &self,
        product: &Product,
        marketplace: &Marketplace,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<PriceTimelineReport> {
        let listings = self
            .repository
            .find_by_product_and_marketplace(&product.id, &marketplace.id)?;
        if listings.is_empty() {
            return Err(Error::NotFound(
                "Listings for this product and marketplace not found".to_string(),
            ));
        }

        let prices = timeline::fill_gaps(timeline::build_timeline(
            &listings, date_start, date_end,
        ));
        Ok(PriceTimelineReport {
            product_name: product.name.clone(),
            marketplace_name: marketplace.name.clone(),
            prices,
        })
    }

    fn marketplace_names(&self) -> Result<HashMap<String, String>> {
        Ok(self
            .marketplace_repository
            .load_marketplaces()?
            .into_iter()
            .map(|marketplace| (marketplace.id, marketplace.name))
            .collect())
    }

    fn comparison_report(
        &self,
        product: &Product,
        marketplace_names: &HashMap<String, String>,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<PriceComparisonReport> {
        let listings =
            self.repository
                .find_by_product_in_range(&product.id, date_start, date_end)?;

        let mut prices_by_day: BTreeMap<NaiveDate, HashMap<String, i64>> = BTreeMap::new();
        for listing in &listings {
            let marketplace_name = marketplace_names
                .get(&listing.marketplace_id)
                .ok_or_else(|| {
                    Error::Unexpected(format!(
                        "Listing {} references unknown marketplace {}",
                        listing.id, listing.marketplace_id
                    ))
                })?;
            for date in timeline::days_in(listing.date_start, listing.date_end) {
                if date >= date_start && date < date_end {
                    prices_by_day
                        .entry(date)
                        .or_default()
                        .insert(marketplace_name.clone(), listing.price);
                }
            }
        }

        Ok(PriceComparisonReport {
            product_name: product.name.clone(),
            prices_by_day,
        })
    }
}

#[async_trait::async_trait]
impl ListingServiceTrait for ListingService {
    fn get_listings(&self) -> Result<Vec<Listing>> {
        self.repository.load_listings()
    }

    fn get_listing(&self, listing_id: &str) -> Result<Listing> {
        self.repository
            .find_by_id(listing_id)?
            .ok_or_else(|| Error::NotFound("Listing with this id not found".to_string()))
    }

    async fn create_listing(&self, new_listing: NewListing) -> Result<Listing> {
        if new_listing.price <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Price must be positive".to_string(),
            )));
        }
        if new_listing.date_end < new_listing.date_start {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Date end cannot be before date start".to_string(),
            )));
        }

        let product = self.resolve_product(&new_listing.product_id)?;
        let marketplace = self.resolve_marketplace(&new_listing.marketplace_id)?;

        let existing = self
            .repository
            .find_by_product_and_marketplace(&product.id, &marketplace.id)?;
        overlap::check_no_overlap(&new_listing, &existing)?;

        debug!(
            "Creating listing for product {} at marketplace {} over [{}, {})",
            product.name, marketplace.name, new_listing.date_start, new_listing.date_end
        );
        self.repository.insert(new_listing).await
    }

    /// Applies single-create sequentially and aborts on the first failure.
    /// Listings created before the failing element stay persisted.
    async fn create_listings(&self, new_listings: Vec<NewListing>) -> Result<Vec<Listing>> {
        let mut created = Vec::with_capacity(new_listings.len());
        for new_listing in new_listings {
            created.push(self.create_listing(new_listing).await?);
        }
        Ok(created)
    }

    async fn delete_listing(&self, listing_id: String) -> Result<()> {
        self.get_listing(&listing_id)?;
        self.repository.delete(listing_id).await?;
        Ok(())
    }

    fn price_dynamic_for_marketplace(
        &self,
        product_id: &str,
        marketplace_id: &str,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<PriceTimelineReport> {
        let product = self.resolve_product(product_id)?;
        let marketplace = self.resolve_marketplace(marketplace_id)?;
        self.dynamic_report(&product, &marketplace, date_start, date_end)
    }

    /// One timeline per marketplace. A marketplace with no listings for the
    /// product fails the whole call; see the comparison reports for the
    /// opposite policy.
    fn price_dynamic(
        &self,
        product_id: &str,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<Vec<PriceTimelineReport>> {
        let product = self.resolve_product(product_id)?;
        let marketplaces = self.marketplace_repository.load_marketplaces()?;

        let mut reports = Vec::with_capacity(marketplaces.len());
        for marketplace in &marketplaces {
            reports.push(self.dynamic_report(&product, marketplace, date_start, date_end)?);
        }
        Ok(reports)
    }

    fn compare_prices(
        &self,
        product_id: &str,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<PriceComparisonReport> {
        let product = self.resolve_product(product_id)?;
        let marketplace_names = self.marketplace_names()?;
        self.comparison_report(&product, &marketplace_names, date_start, date_end)
    }

    /// One comparison per product, skipping products with no activity in
    /// the window instead of failing the whole call.
    fn compare_prices_all(
        &self,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<Vec<PriceComparisonReport>> {
        let products = self.product_repository.load_products()?;
        let marketplace_names = self.marketplace_names()?;

        let mut reports = Vec::new();
        for product in &products {
            let report =
                self.comparison_report(product, &marketplace_names, date_start, date_end)?;
            if !report.prices_by_day.is_empty() {
                reports.push(report);
            }
        }
        Ok(reports)
    }
}
