//! Estimated system power draw.

use rigcheck_catalog::{Category, Product, SpecField};

use crate::selection::Selection;

/// Flat allowance for fans, I/O and margin, added once per build.
pub const DEFAULT_HEADROOM_WATTS: f64 = 50.0;

/// Fallback draw for parts whose record carries no TDP figure.
pub fn category_default_watts(category: Category) -> f64 {
    match category {
        Category::Motherboard => 70.0,
        Category::Ram => 15.0,
        Category::CpuCooler => 5.0,
        Category::Storage => 10.0,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerModel {
    pub headroom_watts: f64,
}

impl Default for PowerModel {
    fn default() -> Self {
        Self {
            headroom_watts: DEFAULT_HEADROOM_WATTS,
        }
    }
}

impl PowerModel {
    pub fn new(headroom_watts: f64) -> Self {
        Self { headroom_watts }
    }

    /// Explicit TDP (any alias, numeric prefix accepted), else the category default.
    pub fn part_draw(&self, product: &Product) -> f64 {
        product
            .read(SpecField::Tdp)
            .as_number()
            .filter(|w| *w >= 0.0)
            .unwrap_or_else(|| category_default_watts(product.category))
    }

    /// Sum of all occupied slots plus headroom.
    ///
    /// Records without a spec record contribute nothing.
    pub fn total_draw(&self, selection: &Selection<'_>) -> f64 {
        let parts: f64 = selection
            .iter()
            .filter(|(_, product)| !product.is_malformed())
            .map(|(_, product)| self.part_draw(product))
            .sum();
        parts + self.headroom_watts
    }
}
