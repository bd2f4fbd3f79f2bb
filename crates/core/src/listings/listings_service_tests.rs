#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result};
    use crate::listings::{
        DayPrice, Listing, ListingRepositoryTrait, ListingService, ListingServiceTrait,
        NewListing,
    };
    use crate::marketplaces::{Marketplace, MarketplaceRepositoryTrait, NewMarketplace};
    use crate::products::{NewProduct, Product, ProductRepositoryTrait};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    // --- Mock ListingRepository ---
    #[derive(Default)]
    struct MockListingRepository {
        listings: Arc<Mutex<Vec<Listing>>>,
    }

    impl MockListingRepository {
        fn add(&self, listing: Listing) {
            self.listings.lock().unwrap().push(listing);
        }
    }

    #[async_trait]
    impl ListingRepositoryTrait for MockListingRepository {
        fn load_listings(&self) -> Result<Vec<Listing>> {
            Ok(self.listings.lock().unwrap().clone())
        }

        fn find_by_id(&self, listing_id: &str) -> Result<Option<Listing>> {
            Ok(self
                .listings
                .lock()
                .unwrap()
                .iter()
                .find(|l| l.id == listing_id)
                .cloned())
        }

        fn find_by_product_and_marketplace(
            &self,
            product_id: &str,
            marketplace_id: &str,
        ) -> Result<Vec<Listing>> {
            let mut listings: Vec<Listing> = self
                .listings
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.product_id == product_id && l.marketplace_id == marketplace_id)
                .cloned()
                .collect();
            listings.sort_by_key(|l| l.date_start);
            Ok(listings)
        }

        fn find_by_product_in_range(
            &self,
            product_id: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<Listing>> {
            let mut listings: Vec<Listing> = self
                .listings
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.product_id == product_id && l.date_start >= start && l.date_end <= end)
                .cloned()
                .collect();
            listings.sort_by_key(|l| l.date_start);
            Ok(listings)
        }

        fn find_by_product_and_marketplace_in_range(
            &self,
            product_id: &str,
            marketplace_id: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<Listing>> {
            Ok(self
                .find_by_product_in_range(product_id, start, end)?
                .into_iter()
                .filter(|l| l.marketplace_id == marketplace_id)
                .collect())
        }

        async fn insert(&self, new_listing: NewListing) -> Result<Listing> {
            let mut listings = self.listings.lock().unwrap();
            let listing = Listing {
                id: format!("listing-{}", listings.len() + 1),
                product_id: new_listing.product_id,
                marketplace_id: new_listing.marketplace_id,
                price: new_listing.price,
                date_start: new_listing.date_start,
                date_end: new_listing.date_end,
            };
            listings.push(listing.clone());
            Ok(listing)
        }

        async fn delete(&self, listing_id: String) -> Result<usize> {
            let mut listings = self.listings.lock().unwrap();
            let before = listings.len();
            listings.retain(|l| l.id != listing_id);
            Ok(before - listings.len())
        }
    }

    // --- Mock ProductRepository ---
    #[derive(Default)]
    struct MockProductRepository {
        products: Arc<Mutex<Vec<Product>>>,
    }

    impl MockProductRepository {
        fn add(&self, product: Product) {
            self.products.lock().unwrap().push(product);
        }
    }

    #[async_trait]
    impl ProductRepositoryTrait for MockProductRepository {
        fn load_products(&self) -> Result<Vec<Product>> {
            Ok(self.products.lock().unwrap().clone())
        }

        fn find_by_id(&self, product_id: &str) -> Result<Option<Product>> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == product_id)
                .cloned())
        }

        fn find_by_name(&self, name: &str) -> Result<Option<Product>> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.name == name)
                .cloned())
        }

        async fn insert(&self, _new_product: NewProduct) -> Result<Product> {
            unimplemented!()
        }

        async fn update(&self, _product: Product) -> Result<Product> {
            unimplemented!()
        }

        async fn delete(&self, _product_id: String) -> Result<usize> {
            unimplemented!()
        }
    }

    // --- Mock MarketplaceRepository ---
    #[derive(Default)]
    struct MockMarketplaceRepository {
        marketplaces: Arc<Mutex<Vec<Marketplace>>>,
    }

    impl MockMarketplaceRepository {
        fn add(&self, marketplace: Marketplace) {
            self.marketplaces.lock().unwrap().push(marketplace);
        }
    }

    #[async_trait]
    impl MarketplaceRepositoryTrait for MockMarketplaceRepository {
        fn load_marketplaces(&self) -> Result<Vec<Marketplace>> {
            Ok(self.marketplaces.lock().unwrap().clone())
        }

        fn find_by_id(&self, marketplace_id: &str) -> Result<Option<Marketplace>> {
            Ok(self
                .marketplaces
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.id == marketplace_id)
                .cloned())
        }

        fn find_by_name(&self, name: &str) -> Result<Option<Marketplace>> {
            Ok(self
                .marketplaces
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.name == name)
                .cloned())
        }

        async fn insert(&self, _new_marketplace: NewMarketplace) -> Result<Marketplace> {
            unimplemented!()
        }

        async fn update(&self, _marketplace: Marketplace) -> Result<Marketplace> {
            unimplemented!()
        }

        async fn delete(&self, _marketplace_id: String) -> Result<usize> {
            unimplemented!()
        }
    }

    // --- Fixtures ---

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    struct Fixture {
        listing_repo: Arc<MockListingRepository>,
        product_repo: Arc<MockProductRepository>,
        marketplace_repo: Arc<MockMarketplaceRepository>,
        service: ListingService,
    }

    fn fixture() -> Fixture {
        let listing_repo = Arc::new(MockListingRepository::default());
        let product_repo = Arc::new(MockProductRepository::default());
        let marketplace_repo = Arc::new(MockMarketplaceRepository::default());
        let service = ListingService::new(
            listing_repo.clone(),
            product_repo.clone(),
            marketplace_repo.clone(),
        );
        Fixture {
            listing_repo,
            product_repo,
            marketplace_repo,
            service,
        }
    }

    fn milk() -> Product {
        Product {
            id: "p-milk".to_string(),
            name: "milk".to_string(),
            category_id: None,
        }
    }

    fn magnit() -> Marketplace {
        Marketplace {
            id: "m-magnit".to_string(),
            name: "Magnit".to_string(),
        }
    }

    fn perekrestok() -> Marketplace {
        Marketplace {
            id: "m-perekrestok".to_string(),
            name: "Perekrestok".to_string(),
        }
    }

    fn listing(
        id: &str,
        product: &Product,
        marketplace: &Marketplace,
        price: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Listing {
        Listing {
            id: id.to_string(),
            product_id: product.id.clone(),
            marketplace_id: marketplace.id.clone(),
            price,
            date_start: start,
            date_end: end,
        }
    }

    fn new_listing(
        product: &Product,
        marketplace: &Marketplace,
        price: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> NewListing {
        NewListing {
            id: None,
            product_id: product.id.clone(),
            marketplace_id: marketplace.id.clone(),
            price,
            date_start: start,
            date_end: end,
        }
    }

    // --- Lifecycle ---

    #[tokio::test]
    async fn create_accepts_adjacent_listings() {
        let f = fixture();
        f.product_repo.add(milk());
        f.marketplace_repo.add(magnit());

        let first = new_listing(&milk(), &magnit(), 100, d(1), d(5));
        let second = new_listing(&milk(), &magnit(), 80, d(5), d(9));
        f.service.create_listing(first).await.unwrap();
        f.service.create_listing(second).await.unwrap();

        assert_eq!(f.listing_repo.load_listings().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_rejects_overlapping_listing() {
        let f = fixture();
        f.product_repo.add(milk());
        f.marketplace_repo.add(magnit());

        f.service
            .create_listing(new_listing(&milk(), &magnit(), 100, d(1), d(5)))
            .await
            .unwrap();
        let result = f
            .service
            .create_listing(new_listing(&milk(), &magnit(), 90, d(3), d(7)))
            .await;

        assert!(matches!(result, Err(Error::Conflict(_))));
        assert_eq!(f.listing_repo.load_listings().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_non_positive_price() {
        let f = fixture();
        f.product_repo.add(milk());
        f.marketplace_repo.add(magnit());

        let result = f
            .service
            .create_listing(new_listing(&milk(), &magnit(), 0, d(1), d(5)))
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn create_rejects_end_before_start() {
        let f = fixture();
        f.product_repo.add(milk());
        f.marketplace_repo.add(magnit());

        let result = f
            .service
            .create_listing(new_listing(&milk(), &magnit(), 100, d(5), d(1)))
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn create_requires_existing_product_and_marketplace() {
        let f = fixture();
        f.marketplace_repo.add(magnit());
        let result = f
            .service
            .create_listing(new_listing(&milk(), &magnit(), 100, d(1), d(5)))
            .await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        let f = fixture();
        f.product_repo.add(milk());
        let result = f
            .service
            .create_listing(new_listing(&milk(), &magnit(), 100, d(1), d(5)))
            .await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn bulk_create_stops_at_first_failure() {
        let f = fixture();
        f.product_repo.add(milk());
        f.marketplace_repo.add(magnit());

        let batch = vec![
            new_listing(&milk(), &magnit(), 100, d(1), d(5)),
            new_listing(&milk(), &magnit(), 90, d(4), d(8)), // overlaps the first
            new_listing(&milk(), &magnit(), 80, d(10), d(12)),
        ];
        let result = f.service.create_listings(batch).await;

        assert!(matches!(result, Err(Error::Conflict(_))));
        // The element before the failing one stays persisted.
        assert_eq!(f.listing_repo.load_listings().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_listing_is_not_found() {
        let f = fixture();
        let result = f.service.delete_listing("nope".to_string()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_listing() {
        let f = fixture();
        f.listing_repo
            .add(listing("l1", &milk(), &magnit(), 100, d(1), d(5)));
        f.service.delete_listing("l1".to_string()).await.unwrap();
        assert!(f.listing_repo.load_listings().unwrap().is_empty());
    }

    // --- Price dynamic ---

    #[tokio::test]
    async fn price_dynamic_for_marketplace_follows_price_changes() {
        let f = fixture();
        let product = milk();
        let marketplace = magnit();
        f.product_repo.add(product.clone());
        f.marketplace_repo.add(marketplace.clone());
        // 100 over [d7, d10), 80 over [d10, d11): days 7..=10 → 100,100,100,80
        f.listing_repo
            .add(listing("l1", &product, &marketplace, 100, d(7), d(10)));
        f.listing_repo
            .add(listing("l2", &product, &marketplace, 80, d(10), d(11)));

        let report = f
            .service
            .price_dynamic_for_marketplace(&product.id, &marketplace.id, d(7), d(11))
            .unwrap();

        assert_eq!(report.product_name, "milk");
        assert_eq!(report.marketplace_name, "Magnit");
        assert_eq!(
            report.prices,
            vec![
                DayPrice { date: d(7), price: 100 },
                DayPrice { date: d(8), price: 100 },
                DayPrice { date: d(9), price: 100 },
                DayPrice { date: d(10), price: 80 },
            ]
        );
    }

    #[tokio::test]
    async fn price_dynamic_fills_gaps_with_last_known_price() {
        let f = fixture();
        let product = milk();
        let marketplace = magnit();
        f.product_repo.add(product.clone());
        f.marketplace_repo.add(marketplace.clone());
        f.listing_repo
            .add(listing("l1", &product, &marketplace, 100, d(1), d(2)));
        f.listing_repo
            .add(listing("l2", &product, &marketplace, 80, d(4), d(6)));

        let report = f
            .service
            .price_dynamic_for_marketplace(&product.id, &marketplace.id, d(1), d(6))
            .unwrap();

        let prices: Vec<i64> = report.prices.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![100, 100, 100, 80, 80]);
    }

    #[tokio::test]
    async fn price_dynamic_errors_when_pair_has_no_listings() {
        let f = fixture();
        f.product_repo.add(milk());
        f.marketplace_repo.add(magnit());

        let result = f
            .service
            .price_dynamic_for_marketplace(&milk().id, &magnit().id, d(1), d(5));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn price_dynamic_all_marketplaces_returns_one_report_each() {
        let f = fixture();
        let product = milk();
        f.product_repo.add(product.clone());
        f.marketplace_repo.add(magnit());
        f.marketplace_repo.add(perekrestok());
        f.listing_repo
            .add(listing("l1", &product, &magnit(), 100, d(7), d(10)));
        f.listing_repo
            .add(listing("l2", &product, &perekrestok(), 80, d(9), d(11)));

        let reports = f.service.price_dynamic(&product.id, d(7), d(11)).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].marketplace_name, "Magnit");
        assert_eq!(reports[1].marketplace_name, "Perekrestok");
    }

    #[tokio::test]
    async fn price_dynamic_all_marketplaces_fails_on_empty_marketplace() {
        let f = fixture();
        let product = milk();
        f.product_repo.add(product.clone());
        f.marketplace_repo.add(magnit());
        f.marketplace_repo.add(perekrestok());
        // Perekrestok has no listings for the product.
        f.listing_repo
            .add(listing("l1", &product, &magnit(), 100, d(7), d(10)));

        let result = f.service.price_dynamic(&product.id, d(7), d(11));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    // --- Price comparison ---

    #[tokio::test]
    async fn compare_prices_maps_each_day_to_active_marketplaces() {
        let f = fixture();
        let product = milk();
        f.product_repo.add(product.clone());
        f.marketplace_repo.add(magnit());
        f.marketplace_repo.add(perekrestok());
        // Magnit 100 over [d7, d10), Perekrestok 80 over [d9, d11).
        f.listing_repo
            .add(listing("l1", &product, &magnit(), 100, d(7), d(10)));
        f.listing_repo
            .add(listing("l2", &product, &perekrestok(), 80, d(9), d(11)));

        let report = f.service.compare_prices(&product.id, d(7), d(11)).unwrap();

        assert_eq!(report.product_name, "milk");
        let days: Vec<NaiveDate> = report.prices_by_day.keys().copied().collect();
        assert_eq!(days, vec![d(7), d(8), d(9), d(10)]);
        assert_eq!(report.prices_by_day[&d(7)].len(), 1);
        assert_eq!(report.prices_by_day[&d(7)]["Magnit"], 100);
        assert_eq!(report.prices_by_day[&d(9)].len(), 2);
        assert_eq!(report.prices_by_day[&d(9)]["Magnit"], 100);
        assert_eq!(report.prices_by_day[&d(9)]["Perekrestok"], 80);
        assert_eq!(report.prices_by_day[&d(10)].len(), 1);
        assert_eq!(report.prices_by_day[&d(10)]["Perekrestok"], 80);
    }

    #[tokio::test]
    async fn compare_prices_is_idempotent() {
        let f = fixture();
        let product = milk();
        f.product_repo.add(product.clone());
        f.marketplace_repo.add(magnit());
        f.listing_repo
            .add(listing("l1", &product, &magnit(), 100, d(7), d(10)));

        let first = f.service.compare_prices(&product.id, d(7), d(11)).unwrap();
        let second = f.service.compare_prices(&product.id, d(7), d(11)).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn compare_prices_all_skips_products_without_activity() {
        let f = fixture();
        let active = milk();
        let idle = Product {
            id: "p-bread".to_string(),
            name: "bread".to_string(),
            category_id: None,
        };
        f.product_repo.add(active.clone());
        f.product_repo.add(idle);
        f.marketplace_repo.add(magnit());
        f.listing_repo
            .add(listing("l1", &active, &magnit(), 100, d(7), d(10)));

        let reports = f.service.compare_prices_all(d(7), d(11)).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].product_name, "milk");
    }
}
