//! Browse session: the product list, facets and criteria for the category
//! the user is currently adding.

use rigcheck_builds::Build;
use rigcheck_catalog::{Category, Product};
use rigcheck_discovery::{FacetIndex, FilterCriteria, Page, PriceRange, build_facets, facets_for};

use crate::catalog::CatalogSource;
use crate::config::EngineConfig;
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq)]
struct OpenCategory {
    category: Category,
    products: Vec<Product>,
    default_range: PriceRange,
    facets: FacetIndex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrowseSession {
    config: EngineConfig,
    open: Option<OpenCategory>,
    criteria: FilterCriteria,
}

impl BrowseSession {
    pub fn new(config: EngineConfig) -> Self {
        let criteria = config.criteria();
        Self {
            config,
            open: None,
            criteria,
        }
    }

    /// Fetch `category` and rebuild its price range and facet index.
    ///
    /// Whatever was open before is discarded, criteria included. On a
    /// catalog failure the session is left unchanged.
    pub async fn open<C>(&mut self, catalog: &C, category: Category) -> Result<(), CatalogError>
    where
        C: CatalogSource + ?Sized,
    {
        let products = catalog.products(category).await?;
        let default_range = PriceRange::catalog_default(&products, self.config.preferred_merchant.as_deref());
        let facets = build_facets(&products, facets_for(category));
        tracing::info!(
            %category,
            products = products.len(),
            facets = facets.len(),
            "catalog loaded for browsing"
        );

        self.open = Some(OpenCategory {
            category,
            products,
            default_range,
            facets,
        });
        self.criteria = self.config.criteria();
        Ok(())
    }

    pub fn close(&mut self) {
        self.open = None;
        self.criteria = self.config.criteria();
    }

    pub fn category(&self) -> Option<Category> {
        self.open.as_ref().map(|o| o.category)
    }

    pub fn products(&self) -> &[Product] {
        self.open.as_ref().map(|o| o.products.as_slice()).unwrap_or_default()
    }

    pub fn default_price_range(&self) -> Option<PriceRange> {
        self.open.as_ref().map(|o| o.default_range)
    }

    pub fn facets(&self) -> Option<&FacetIndex> {
        self.open.as_ref().map(|o| &o.facets)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    /// Run the pipeline for the open category against the current build.
    ///
    /// `None` when no category is open.
    pub fn refilter(&self, build: &Build) -> Option<Page<'_>> {
        let open = self.open.as_ref()?;
        let evaluator = self.config.evaluator();
        let page = self
            .config
            .pipeline(&evaluator)
            .run(&open.products, &self.criteria, &build.selection(), open.category);
        Some(page)
    }
}
