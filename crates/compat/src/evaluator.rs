//! Rule evaluator: runs the rule table over a selection snapshot.

use serde::{Deserialize, Serialize};

use crate::power::PowerModel;
use crate::rules::{CANONICAL_RULES, Outcome, Rule};
use crate::selection::Selection;
use crate::verdict::{Verdict, Violation};

/// Whether evaluation stops at the first violation or collects all of them.
///
/// Both modes agree on `is_compatible()`; they differ only in how many
/// violations the verdict lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    FirstFailure,
    #[default]
    All,
}

#[derive(Debug, Clone)]
pub struct Evaluator {
    rules: Vec<Rule>,
    power: PowerModel,
    mode: EvaluationMode,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(PowerModel::default(), EvaluationMode::default())
    }
}

impl Evaluator {
    /// Evaluator over the canonical rule table.
    pub fn new(power: PowerModel, mode: EvaluationMode) -> Self {
        Self::with_rules(CANONICAL_RULES.to_vec(), power, mode)
    }

    pub fn with_rules(rules: Vec<Rule>, power: PowerModel, mode: EvaluationMode) -> Self {
        Self { rules, power, mode }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn power(&self) -> &PowerModel {
        &self.power
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    /// Evaluate the snapshot. Pure: the same selection always yields the same verdict.
    pub fn evaluate(&self, selection: &Selection<'_>) -> Verdict {
        let mut violations = Vec::new();
        for rule in &self.rules {
            let Outcome::Fail(detail) = rule.check(selection, &self.power) else {
                continue;
            };
            tracing::debug!(rule = rule.id.as_str(), %detail, "compatibility rule violated");
            violations.push(Violation {
                rule: rule.id,
                categories: rule.reads.to_vec(),
                reason: format!("{} ({detail})", rule.reason),
            });
            if self.mode == EvaluationMode::FirstFailure {
                break;
            }
        }
        Verdict::from_violations(violations)
    }

    /// Pass/fail only; stops at the first failing rule regardless of mode.
    pub fn is_compatible(&self, selection: &Selection<'_>) -> bool {
        self.rules
            .iter()
            .all(|rule| !matches!(rule.check(selection, &self.power), Outcome::Fail(_)))
    }
}
