use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::category::Category;
use crate::normalize::Normalized;
use crate::price::{Price, Prices};
use crate::spec::{self, SpecField};

/// External, stable catalog identifier (e.g. an open-db id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

static NO_SPECS: Value = Value::Null;

/// One catalog entry (read-only from the engine's point of view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "opendb_id")]
    pub id: ProductId,
    pub category: Category,
    /// Semi-structured spec record; `None` marks a malformed product.
    #[serde(default)]
    pub specs: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prices: Prices,
    /// Merchant name -> image URL; merchants listed without an image map to `None`.
    #[serde(default, alias = "storeImg", deserialize_with = "null_as_default")]
    pub images: BTreeMap<String, Option<String>>,
}

/// A `null` field decodes like a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    pub fn new(id: impl Into<String>, category: Category, specs: Value) -> Self {
        Self {
            id: ProductId::new(id),
            category,
            specs: Some(specs),
            prices: Prices::new(),
            images: BTreeMap::new(),
        }
    }

    /// A record without any spec data; rejected when selected into a build.
    pub fn without_specs(id: impl Into<String>, category: Category) -> Self {
        Self {
            specs: None,
            ..Self::new(id, category, Value::Null)
        }
    }

    pub fn with_price(mut self, merchant: impl Into<String>, amount: f64) -> Self {
        self.prices.insert(merchant, amount);
        self
    }

    /// Spec record, or `null` when missing; lookups on `null` resolve to absent.
    pub fn specs(&self) -> &Value {
        self.specs.as_ref().unwrap_or(&NO_SPECS)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.specs, None | Some(Value::Null))
    }

    /// Normalized value of a logical attribute.
    pub fn read(&self, field: SpecField) -> Normalized {
        spec::read(self.specs(), field)
    }

    pub fn best_price(&self, preferred_merchant: Option<&str>) -> Option<Price> {
        self.prices.best(preferred_merchant)
    }

    pub fn supports_3d(&self) -> bool {
        self.read(SpecField::Supports3d).as_flag() == Some(true)
    }

    /// Human-readable name used for display and free-text search.
    ///
    /// Explicit name field, else `manufacturer series model`, else the id.
    pub fn display_name(&self) -> String {
        let specs = self.specs();
        if let Some(name) = spec::read_str(specs, SpecField::DisplayName) {
            return name.to_string();
        }
        let parts: Vec<&str> = [SpecField::Manufacturer, SpecField::Series, SpecField::Model]
            .into_iter()
            .filter_map(|field| spec::read_str(specs, field))
            .collect();
        if parts.is_empty() {
            self.id.to_string()
        } else {
            parts.join(" ")
        }
    }
}
