//! Product discovery: facet indexes and the filter/sort/paginate pipeline.
//!
//! Everything here is a pure function of the product list, the criteria and
//! a build snapshot. Compatibility filtering delegates to the evaluator in
//! `rigcheck-compat` and never touches the caller's build.

pub mod criteria;
pub mod facets;
pub mod pipeline;

pub use criteria::{FilterCriteria, PriceRange, SortOrder, DEFAULT_PAGE_SIZE};
pub use facets::{FacetDef, FacetIndex, build_facets, facets_for};
pub use pipeline::{Page, Pipeline};
