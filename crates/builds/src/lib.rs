//! Build domain module (command/event aggregate).
//!
//! A build is the user's current selection of at most one product per
//! category. This crate holds the state and its mutation rules only; the
//! evaluator and the discovery pipeline read snapshots of it.

pub mod build;
pub mod record;

pub use build::{
    Build, BuildCommand, BuildEvent, BuildRenamed, BuildSummary, DEFAULT_BUILD_NAME, PartRejected,
    PartRemoved, PartSelected, RemovePart, Rename, SelectPart,
};
pub use record::BuildRecord;
