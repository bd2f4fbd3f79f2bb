//! Database models for price listings.

use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::marketplaces::MarketplaceDB;
use crate::products::ProductDB;
use pricetrack_core::listings::{Listing, NewListing};

/// Database model for listings. The covered range is half-open:
/// `[date_start, date_end)`.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(ProductDB, foreign_key = product_id))]
#[diesel(belongs_to(MarketplaceDB, foreign_key = marketplace_id))]
#[diesel(table_name = crate::schema::listings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ListingDB {
    pub id: String,
    pub product_id: String,
    pub marketplace_id: String,
    pub price: i64,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
}

impl From<ListingDB> for Listing {
    fn from(db: ListingDB) -> Self {
        Self {
            id: db.id,
            product_id: db.product_id,
            marketplace_id: db.marketplace_id,
            price: db.price,
            date_start: db.date_start,
            date_end: db.date_end,
        }
    }
}

impl ListingDB {
    pub fn from_new(new: NewListing, id: String) -> Self {
        Self {
            id: new.id.unwrap_or(id),
            product_id: new.product_id,
            marketplace_id: new.marketplace_id,
            price: new.price,
            date_start: new.date_start,
            date_end: new.date_end,
        }
    }
}
