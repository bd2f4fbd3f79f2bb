//! Database models for products.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::categories::CategoryDB;
use pricetrack_core::products::{NewProduct, Product};

/// Database model for products
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(CategoryDB, foreign_key = category_id))]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct ProductDB {
    pub id: String,
    pub name: String,
    pub category_id: Option<String>,
}

impl From<ProductDB> for Product {
    fn from(db: ProductDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            category_id: db.category_id,
        }
    }
}

impl ProductDB {
    pub fn from_new(new: NewProduct, id: String) -> Self {
        Self {
            id: new.id.unwrap_or(id),
            name: new.name,
            category_id: new.category_id,
        }
    }
}
