use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use rigcheck_catalog::{Price, Product, normalize_token};

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Catalog order, priced items first.
    #[default]
    Catalog,
    PriceAsc,
    PriceDesc,
}

/// Inclusive best-price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

impl PriceRange {
    pub fn new(min: Price, max: Price) -> Self {
        Self { min, max }
    }

    /// `[0, highest best price]` over the list; `[0, 0]` when nothing is priced.
    pub fn catalog_default<'a>(
        products: impl IntoIterator<Item = &'a Product>,
        preferred_merchant: Option<&str>,
    ) -> Self {
        let max = products
            .into_iter()
            .filter_map(|p| p.best_price(preferred_merchant))
            .max()
            .unwrap_or(Price::ZERO);
        Self::new(Price::ZERO, max)
    }

    pub fn contains(&self, price: Price) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Filter criteria as set by the filtering UI.
///
/// Passed by value (or shared reference) into every pipeline run; the
/// pipeline never keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// `None` means the user has not narrowed price.
    pub price: Option<PriceRange>,
    pub query: String,
    /// Facet key -> checked values (normalized tokens).
    pub selected: BTreeMap<String, BTreeSet<String>>,
    pub compatible_only: bool,
    pub only_3d: bool,
    pub sort: SortOrder,
    /// 1-indexed.
    pub page: usize,
    pub page_size: usize,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            price: None,
            query: String::new(),
            selected: BTreeMap::new(),
            compatible_only: false,
            only_3d: false,
            sort: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterCriteria {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    pub fn with_price(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn compatible_only(mut self, on: bool) -> Self {
        self.compatible_only = on;
        self
    }

    pub fn only_3d(mut self, on: bool) -> Self {
        self.only_3d = on;
        self
    }

    pub fn sorted(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Check a facet value. Values are stored normalized.
    pub fn check(mut self, facet: &str, value: &str) -> Self {
        self.toggle(facet, value, true);
        self
    }

    pub fn toggle(&mut self, facet: &str, value: &str, checked: bool) {
        let token = normalize_token(value);
        if checked {
            self.selected.entry(facet.to_string()).or_default().insert(token);
        } else if let Some(values) = self.selected.get_mut(facet) {
            values.remove(&token);
            if values.is_empty() {
                self.selected.remove(facet);
            }
        }
    }

    /// Facets with at least one checked value.
    pub fn active_facets(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> + '_ {
        self.selected
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Whitespace-separated, lowercased search tokens.
    pub fn query_tokens(&self) -> Vec<String> {
        self.query.split_whitespace().map(str::to_lowercase).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigcheck_catalog::Category;
    use serde_json::json;

    #[test]
    fn catalog_default_spans_zero_to_max() {
        let products = [
            Product::new("a", Category::Gpu, json!({})).with_price("A", 499.0),
            Product::new("b", Category::Gpu, json!({})).with_price("A", 1299.99).with_price("B", 1250.0),
            Product::new("c", Category::Gpu, json!({})),
        ];
        let range = PriceRange::catalog_default(&products, None);
        assert_eq!(range, PriceRange::new(Price::ZERO, Price::from_minor(125_000)));

        let preferred = PriceRange::catalog_default(&products, Some("A"));
        assert_eq!(preferred.max, Price::from_minor(129_999));

        assert_eq!(
            PriceRange::catalog_default(&products[2..], None),
            PriceRange::new(Price::ZERO, Price::ZERO)
        );
    }

    #[test]
    fn toggling_facets_normalizes_and_prunes() {
        let mut criteria = FilterCriteria::default().check("socket", " AM5");
        assert_eq!(criteria.active_facets().count(), 1);
        assert!(criteria.selected["socket"].contains("am5"));

        criteria.toggle("socket", "am5", false);
        assert!(criteria.selected.is_empty());
    }

    #[test]
    fn query_tokens_split_on_whitespace() {
        let criteria = FilterCriteria::default().with_query("  DDR5   32 ");
        assert_eq!(criteria.query_tokens(), vec!["ddr5", "32"]);
    }

    #[test]
    fn deserializes_with_defaults() {
        let criteria: FilterCriteria =
            serde_json::from_value(json!({"compatible_only": true, "sort": "price_desc"})).unwrap();
        assert!(criteria.compatible_only);
        assert_eq!(criteria.sort, SortOrder::PriceDesc);
        assert_eq!(criteria.page, 1);
        assert_eq!(criteria.page_size, DEFAULT_PAGE_SIZE);
    }
}
