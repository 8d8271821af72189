//! Canonical, comparable forms of raw spec values.
//!
//! Catalog records mix strings, numbers, booleans, arrays and nested objects
//! for the same logical attribute. Everything that compares spec values (rules,
//! facets) goes through [`normalize`] first so the comparison itself stays
//! trivial.

use std::collections::BTreeSet;

use serde_json::Value;

/// How a field should be interpreted when normalizing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Enumerated text, compared trimmed and case-folded.
    Text,
    /// Text that may hold several values (`"ATX, Micro-ATX"` or an array).
    MultiText,
    /// Numeric; strings contribute their leading numeric prefix (`"850W"`).
    Numeric,
    /// Yes/no.
    Flag,
}

/// A normalized spec value.
///
/// `Absent` is distinct from `Number(0.0)` and `Flag(false)`: callers decide
/// whether unknown data skips a check or fails it.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Absent,
    Text(String),
    Number(f64),
    Flag(bool),
    Set(BTreeSet<String>),
}

impl Normalized {
    pub fn is_absent(&self) -> bool {
        matches!(self, Normalized::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Normalized::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Normalized::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Normalized::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Facet tokens contributed by this value; empty when absent.
    pub fn tokens(&self) -> BTreeSet<String> {
        match self {
            Normalized::Absent => BTreeSet::new(),
            Normalized::Text(s) => BTreeSet::from([s.clone()]),
            Normalized::Number(n) => BTreeSet::from([format_number(*n)]),
            Normalized::Flag(b) => BTreeSet::from([flag_token(*b).to_string()]),
            Normalized::Set(set) => set.clone(),
        }
    }

    /// Whether `token` (already normalized) is one of this value's tokens.
    pub fn contains(&self, token: &str) -> bool {
        match self {
            Normalized::Absent => false,
            Normalized::Text(s) => s == token,
            Normalized::Number(n) => format_number(*n) == token,
            Normalized::Flag(b) => flag_token(*b) == token,
            Normalized::Set(set) => set.contains(token),
        }
    }
}

/// Trim and case-fold a single textual token.
pub fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize an optional raw value according to `kind`.
pub fn normalize(value: Option<&Value>, kind: FieldKind) -> Normalized {
    let Some(value) = value else {
        return Normalized::Absent;
    };

    match kind {
        FieldKind::Numeric => match value {
            Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map_or(Normalized::Absent, Normalized::Number),
            Value::String(s) => leading_number(s).map_or(Normalized::Absent, Normalized::Number),
            _ => Normalized::Absent,
        },
        FieldKind::Flag => match value {
            Value::Bool(b) => Normalized::Flag(*b),
            Value::String(s) => parse_flag(s).map_or(Normalized::Absent, Normalized::Flag),
            _ => Normalized::Absent,
        },
        FieldKind::Text => match value {
            Value::Array(items) => set_of(items),
            other => scalar_text(other),
        },
        FieldKind::MultiText => match value {
            Value::Array(items) => set_of(items),
            Value::String(s) => {
                let set: BTreeSet<String> = s
                    .split(',')
                    .map(normalize_token)
                    .filter(|t| !t.is_empty())
                    .collect();
                if set.is_empty() {
                    Normalized::Absent
                } else {
                    Normalized::Set(set)
                }
            }
            other => match scalar_text(other) {
                Normalized::Text(t) => Normalized::Set(BTreeSet::from([t])),
                Normalized::Flag(b) => Normalized::Set(BTreeSet::from([flag_token(b).to_string()])),
                _ => Normalized::Absent,
            },
        },
    }
}

/// Parse the leading numeric prefix of a string (`" 850 W"` -> 850).
pub fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '-' | '+' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    s[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
}

/// Canonical text for a number: integers without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn flag_token(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match normalize_token(raw).as_str() {
        "yes" | "true" => Some(true),
        "no" | "false" => Some(false),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Normalized {
    match value {
        Value::String(s) => {
            let token = normalize_token(s);
            if token.is_empty() {
                Normalized::Absent
            } else {
                Normalized::Text(token)
            }
        }
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .map_or(Normalized::Absent, |f| Normalized::Text(format_number(f))),
        Value::Bool(b) => Normalized::Flag(*b),
        Value::Null | Value::Array(_) | Value::Object(_) => Normalized::Absent,
    }
}

fn set_of(items: &[Value]) -> Normalized {
    let set: BTreeSet<String> = items
        .iter()
        .flat_map(|item| scalar_text(item).tokens())
        .collect();
    if set.is_empty() {
        Normalized::Absent
    } else {
        Normalized::Set(set)
    }
}
