use std::collections::BTreeMap;

use rigcheck_catalog::{Category, Product};

/// Borrowed snapshot of a build: category -> selected product.
///
/// Cheap to copy, so hypothetical builds ("what if this candidate were
/// added?") are built with [`Selection::with`] without touching the live build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection<'a> {
    slots: BTreeMap<Category, &'a Product>,
}

impl<'a> Selection<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `product` into `category`'s slot, returning the previous occupant.
    pub fn insert(&mut self, category: Category, product: &'a Product) -> Option<&'a Product> {
        self.slots.insert(category, product)
    }

    /// A copy of this snapshot with `product` occupying `category`.
    pub fn with(&self, category: Category, product: &'a Product) -> Selection<'a> {
        let mut next = self.clone();
        next.insert(category, product);
        next
    }

    pub fn get(&self, category: Category) -> Option<&'a Product> {
        self.slots.get(&category).copied()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.slots.contains_key(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &'a Product)> + '_ {
        self.slots.iter().map(|(c, p)| (*c, *p))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<'a> FromIterator<(Category, &'a Product)> for Selection<'a> {
    fn from_iter<I: IntoIterator<Item = (Category, &'a Product)>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn with_leaves_original_untouched() {
        let cpu = Product::new("cpu-1", Category::Cpu, json!({"socket": "AM5"}));
        let other = Product::new("cpu-2", Category::Cpu, json!({"socket": "AM4"}));
        let base: Selection<'_> = [(Category::Cpu, &cpu)].into_iter().collect();

        let hypothetical = base.with(Category::Cpu, &other);

        assert_eq!(base.get(Category::Cpu).map(|p| p.id.as_str()), Some("cpu-1"));
        assert_eq!(hypothetical.get(Category::Cpu).map(|p| p.id.as_str()), Some("cpu-2"));
        assert_eq!(hypothetical.len(), 1);
    }
}
