//! Marketplace domain models.

use serde::{Deserialize, Serialize};

/// Domain model representing a marketplace (retail chain)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Marketplace {
    pub id: String,
    pub name: String,
}

/// Input model for creating a new marketplace
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMarketplace {
    pub id: Option<String>,
    pub name: String,
}
