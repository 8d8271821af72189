use rigcheck_builds::{Build, BuildRecord};
use rigcheck_core::BuildId;

use crate::catalog::CatalogSource;
use crate::error::{CatalogError, InfraError, StoreError};
use crate::store::BuildStore;

/// Resolve a record's component ids one by one through the catalog.
///
/// Ids the catalog does not know are skipped with a warning; a catalog
/// failure aborts the whole load.
pub async fn resolve_record<C>(catalog: &C, record: BuildRecord) -> Result<Build, CatalogError>
where
    C: CatalogSource + ?Sized,
{
    let mut products = Vec::with_capacity(record.component_ids.len());
    for id in &record.component_ids {
        match catalog.product(id).await? {
            Some(product) => products.push(product),
            None => tracing::warn!(build = %record.id, product = %id, "component id not found in catalog; skipped"),
        }
    }
    Ok(record.into_build(products))
}

/// Load a persisted build and rehydrate it against the catalog.
pub async fn load_build<S, C>(store: &S, catalog: &C, id: BuildId) -> Result<Build, InfraError>
where
    S: BuildStore + ?Sized,
    C: CatalogSource + ?Sized,
{
    let record = store.load(id).await?.ok_or(StoreError::NotFound(id))?;
    let build = resolve_record(catalog, record).await?;
    tracing::info!(build = %id, parts = build.len(), "build loaded");
    Ok(build)
}
