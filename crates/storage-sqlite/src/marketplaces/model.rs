//! Database models for marketplaces.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use pricetrack_core::marketplaces::{Marketplace, NewMarketplace};

/// Database model for marketplaces
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::marketplaces)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceDB {
    pub id: String,
    pub name: String,
}

impl From<MarketplaceDB> for Marketplace {
    fn from(db: MarketplaceDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
        }
    }
}

impl MarketplaceDB {
    pub fn from_new(new: NewMarketplace, id: String) -> Self {
        Self {
            id: new.id.unwrap_or(id),
            name: new.name,
        }
    }
}
