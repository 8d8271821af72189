use serde::Serialize;

use rigcheck_catalog::Category;

use crate::rules::RuleId;

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: RuleId,
    pub categories: Vec<Category>,
    pub reason: String,
}

/// Result of evaluating a build; compatible iff nothing was violated.
///
/// Violations are in rule-table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verdict {
    violations: Vec<Violation>,
}

impl Verdict {
    pub fn compatible() -> Self {
        Self::default()
    }

    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn is_compatible(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn violated_rules(&self) -> Vec<RuleId> {
        self.violations.iter().map(|v| v.rule).collect()
    }

    pub fn first_violation(&self) -> Option<&Violation> {
        self.violations.first()
    }
}
