//! Configuration loading and representation.

use core::str::FromStr;

use serde::Deserialize;

use rigcheck_compat::{DEFAULT_HEADROOM_WATTS, EvaluationMode, Evaluator, PowerModel};
use rigcheck_discovery::{DEFAULT_PAGE_SIZE, FilterCriteria, Pipeline};

pub const ENV_PAGE_SIZE: &str = "RIGCHECK_PAGE_SIZE";
pub const ENV_VERDICT_MODE: &str = "RIGCHECK_VERDICT_MODE";
pub const ENV_HEADROOM_WATTS: &str = "RIGCHECK_HEADROOM_WATTS";
pub const ENV_PREFERRED_MERCHANT: &str = "RIGCHECK_PREFERRED_MERCHANT";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Products per page; never below 1.
    pub page_size: usize,
    pub verdict_mode: EvaluationMode,
    pub headroom_watts: f64,
    /// Merchant whose price counts as "best" when it has one.
    pub preferred_merchant: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            verdict_mode: EvaluationMode::default(),
            headroom_watts: DEFAULT_HEADROOM_WATTS,
            preferred_merchant: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key -> value source. Unparseable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let page_size = parse_or(&lookup, ENV_PAGE_SIZE, defaults.page_size).max(1);
        let headroom_watts = parse_or(&lookup, ENV_HEADROOM_WATTS, defaults.headroom_watts);
        let verdict_mode = match lookup(ENV_VERDICT_MODE).as_deref().map(str::trim) {
            None | Some("") => defaults.verdict_mode,
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "all" => EvaluationMode::All,
                "first_failure" | "first-failure" => EvaluationMode::FirstFailure,
                _ => {
                    tracing::warn!(key = ENV_VERDICT_MODE, value = raw, "unknown verdict mode; using default");
                    defaults.verdict_mode
                }
            },
        };
        let preferred_merchant = lookup(ENV_PREFERRED_MERCHANT)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        Self {
            page_size,
            verdict_mode,
            headroom_watts,
            preferred_merchant,
        }
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(PowerModel::new(self.headroom_watts), self.verdict_mode)
    }

    pub fn pipeline<'a>(&'a self, evaluator: &'a Evaluator) -> Pipeline<'a> {
        Pipeline::new(evaluator).with_preferred_merchant(self.preferred_merchant.as_deref())
    }

    /// Fresh criteria with the configured page size.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.page_size)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + core::fmt::Debug,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = raw.as_str(), ?default, "unparseable config value; using default");
            default
        }
    }
}
