//! Flat persistence shape of a build.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rigcheck_catalog::{Product, ProductId};
use rigcheck_core::{AggregateRoot, BuildId};

use crate::build::{Build, normalize_name};

/// What the persistence collaborator stores: part ids only, never products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRecord {
    pub id: BuildId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub component_ids: Vec<ProductId>,
    /// Sum of best prices in major currency units.
    #[serde(default)]
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl BuildRecord {
    /// Flatten a build. Component ids follow slot (category) order.
    pub fn from_build(build: &Build, preferred_merchant: Option<&str>) -> Self {
        Self {
            id: *build.id(),
            name: normalize_name(build.name()),
            component_ids: build.parts().map(|p| p.id.clone()).collect(),
            total_price: build.total_price(preferred_merchant).major(),
            created_at: build.created_at(),
        }
    }

    /// Rebuild from products already resolved from `component_ids`.
    pub fn into_build(self, products: impl IntoIterator<Item = Product>) -> Build {
        Build::restore(self.id, &self.name, products, self.created_at)
    }
}
