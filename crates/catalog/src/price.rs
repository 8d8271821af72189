use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Price in smallest currency unit (e.g. kopecks, cents).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Convert a catalog amount in major units (`4599.99`) to minor units.
    ///
    /// Negative, NaN and infinite amounts are not prices.
    pub fn from_major(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        Some(Self((amount * 100.0).round() as u64))
    }

    pub fn minor(&self) -> u64 {
        self.0
    }

    pub fn major(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl core::ops::Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl core::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, |acc, p| acc + p)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Merchant name -> price as found in the catalog record.
///
/// Entries are kept raw: vendors occasionally store strings or nulls, and
/// those simply don't count as prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prices(BTreeMap<String, Value>);

impl Prices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, merchant: impl Into<String>, amount: f64) {
        self.0.insert(merchant.into(), Value::from(amount));
    }

    /// Numeric price offered by one merchant.
    pub fn from_merchant(&self, merchant: &str) -> Option<Price> {
        self.0.get(merchant).and_then(numeric_price)
    }

    /// Best available numeric price.
    ///
    /// The preferred merchant wins when it has a numeric price; otherwise the
    /// lowest numeric price across all merchants.
    pub fn best(&self, preferred: Option<&str>) -> Option<Price> {
        if let Some(price) = preferred.and_then(|m| self.from_merchant(m)) {
            return Some(price);
        }
        self.0.values().filter_map(numeric_price).min()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn numeric_price(value: &Value) -> Option<Price> {
    value.as_f64().and_then(Price::from_major)
}
