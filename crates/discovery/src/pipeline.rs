//! Filter -> sort -> paginate over one category's product list.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;

use rigcheck_catalog::{Category, Price, Product, normalize_token};
use rigcheck_compat::{Evaluator, Selection};

use crate::criteria::{FilterCriteria, PriceRange, SortOrder};
use crate::facets::{FacetDef, facets_for};

/// One page of results. `total` counts every match before slicing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'p> {
    pub items: Vec<&'p Product>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    evaluator: &'a Evaluator,
    preferred_merchant: Option<&'a str>,
}

impl<'a> Pipeline<'a> {
    pub fn new(evaluator: &'a Evaluator) -> Self {
        Self {
            evaluator,
            preferred_merchant: None,
        }
    }

    pub fn with_preferred_merchant(mut self, merchant: Option<&'a str>) -> Self {
        self.preferred_merchant = merchant;
        self
    }

    /// Filter, sort and slice `products` for the `category` slot of `build`.
    pub fn run<'p>(
        &self,
        products: &'p [Product],
        criteria: &FilterCriteria,
        build: &Selection<'_>,
        category: Category,
    ) -> Page<'p> {
        let matches = self.filter_sorted(products, criteria, build, category);
        paginate(matches, criteria.page, criteria.page_size)
    }

    /// Every match, sorted, unsliced.
    pub fn filter_sorted<'p>(
        &self,
        products: &'p [Product],
        criteria: &FilterCriteria,
        build: &Selection<'_>,
        category: Category,
    ) -> Vec<&'p Product> {
        let default_range = PriceRange::catalog_default(products, self.preferred_merchant);
        let range = criteria.price.unwrap_or(default_range);
        let narrowed = range != default_range;

        let mut kept: Vec<(&'p Product, Option<Price>)> = products
            .iter()
            .map(|p| (p, p.best_price(self.preferred_merchant)))
            .filter(|(_, price)| match price {
                Some(price) => range.contains(*price),
                None => !narrowed,
            })
            .collect();
        tracing::debug!(stage = "price", remaining = kept.len(), "pipeline stage");

        if criteria.compatible_only {
            kept.retain(|(p, _)| self.evaluator.is_compatible(&build.with(category, p)));
            tracing::debug!(stage = "compatibility", remaining = kept.len(), "pipeline stage");
        }

        if criteria.only_3d {
            kept.retain(|(p, _)| p.supports_3d());
            tracing::debug!(stage = "3d", remaining = kept.len(), "pipeline stage");
        }

        let tokens = criteria.query_tokens();
        if !tokens.is_empty() {
            kept.retain(|(p, _)| {
                let name = p.display_name().to_lowercase();
                tokens.iter().all(|t| name.contains(t.as_str()))
            });
            tracing::debug!(stage = "search", remaining = kept.len(), "pipeline stage");
        }

        let active = active_facets(criteria, facets_for(category));
        if !active.is_empty() {
            kept.retain(|(p, _)| {
                active
                    .iter()
                    .all(|(def, checked)| def.value(p).tokens().iter().any(|t| checked.contains(t)))
            });
            tracing::debug!(stage = "facets", remaining = kept.len(), "pipeline stage");
        }

        sort(&mut kept, criteria.sort);
        kept.into_iter().map(|(p, _)| p).collect()
    }
}

/// Resolve checked facet keys against the category's table.
fn active_facets(criteria: &FilterCriteria, defs: &'static [FacetDef]) -> Vec<(&'static FacetDef, BTreeSet<String>)> {
    criteria
        .active_facets()
        .filter_map(|(key, values)| {
            let Some(def) = defs.iter().find(|d| d.key == key) else {
                tracing::debug!(facet = key, "ignoring facet not declared for category");
                return None;
            };
            let checked = values.iter().map(|v| normalize_token(v)).collect();
            Some((def, checked))
        })
        .collect()
}

/// Stable; priced items always precede unpriced ones.
fn sort(items: &mut [(&Product, Option<Price>)], order: SortOrder) {
    items.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Catalog => Ordering::Equal,
            SortOrder::PriceAsc => a.cmp(b),
            SortOrder::PriceDesc => b.cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn paginate(matches: Vec<&Product>, page: usize, page_size: usize) -> Page<'_> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total = matches.len();
    let total_pages = total.div_ceil(page_size);
    let items = matches
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();
    Page {
        items,
        total,
        page,
        page_size,
        total_pages,
    }
}
