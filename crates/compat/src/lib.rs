//! Compatibility rule evaluation.
//!
//! Everything here is a pure function of a [`Selection`] snapshot: rules never
//! mutate the build they inspect, never perform IO and never fail. Absent spec
//! data makes a rule not applicable; only a present mismatch fails a build.

pub mod evaluator;
pub mod power;
pub mod rules;
pub mod selection;
pub mod verdict;

pub use evaluator::{EvaluationMode, Evaluator};
pub use power::{DEFAULT_HEADROOM_WATTS, PowerModel, category_default_watts};
pub use rules::{CANONICAL_RULES, Outcome, Rule, RuleId};
pub use selection::Selection;
pub use verdict::{Verdict, Violation};
