//! Database models for categories.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use pricetrack_core::categories::{Category, NewCategory};

/// Database model for categories
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
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
}

impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
        }
    }
}

impl CategoryDB {
    pub fn from_new(new: NewCategory, id: String) -> Self {
        Self {
            id: new.id.unwrap_or(id),
            name: new.name,
        }
    }
}
