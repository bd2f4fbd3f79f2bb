//! Product domain models.

use serde::{Deserialize, Serialize};

/// Domain model representing a retail product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category_id: Option<String>,
}

/// Input model for creating a new product
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub id: Option<String>,
    pub name: String,
    pub category_id: Option<String>,
}
