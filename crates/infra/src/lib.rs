//! Infrastructure layer: collaborator seams, in-memory adapters, config.
//!
//! The engine crates are synchronous and pure. Everything that waits on a
//! catalog or a store lives here, behind async traits.

pub mod autosave;
pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod session;
pub mod store;

pub use autosave::{AutoSaver, SaveOutcome};
pub use catalog::{CatalogSource, InMemoryCatalog};
pub use config::EngineConfig;
pub use error::{CatalogError, InfraError, StoreError};
pub use loader::{load_build, resolve_record};
pub use session::BrowseSession;
pub use store::{BuildStore, InMemoryBuildStore};
