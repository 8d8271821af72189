//! Headline attributes shown on product cards and selected parts.

use serde::Serialize;
use serde_json::Value;

use crate::category::Category;
use crate::normalize::format_number;
use crate::product::Product;
use crate::spec::{SpecField, get};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeySpec {
    pub label: &'static str,
    pub value: String,
}

/// Per-category summary; entries whose data is absent are omitted.
pub fn key_specs(product: &Product) -> Vec<KeySpec> {
    let s = product.specs();
    let entries: Vec<(&'static str, Option<String>)> = match product.category {
        Category::Cpu => vec![
            ("Cores", plain(s, "cores")),
            ("Threads", plain(s, "threads")),
            ("Base Clock", unit(s, "base_clock", " GHz")),
            ("Socket", attr(s, SpecField::Socket)),
        ],
        Category::Motherboard => vec![
            ("Form Factor", attr(s, SpecField::FormFactor)),
            ("Socket", attr(s, SpecField::Socket)),
            ("Chipset", plain(s, "chipset")),
        ],
        Category::Gpu => vec![
            ("Memory", unit(s, "memory_size", " GB")),
            ("Length", attr_unit(s, SpecField::GpuLength, " mm")),
        ],
        Category::Ram => vec![
            ("Capacity", attr_unit(s, SpecField::RamCapacity, " GB")),
            ("Type", attr(s, SpecField::RamType)),
            ("Modules", modules(s)),
        ],
        Category::Storage => vec![
            ("Capacity", unit(s, "capacity", " GB")),
            ("Interface", plain(s, "interface")),
            ("Type", plain(s, "type")),
        ],
        Category::Psu => vec![
            ("Wattage", attr_unit(s, SpecField::Wattage, " W")),
            ("Modular", plain(s, "modular")),
            ("Efficiency", plain(s, "efficiency_rating")),
        ],
        Category::CpuCooler => vec![
            ("RPM", range(s, "rpm_min", "rpm_max", "").or_else(|| plain(s, "rpm"))),
            (
                "Noise Level",
                range(s, "noise_level_min", "noise_level_max", " dBA").or_else(|| plain(s, "noise_level")),
            ),
            ("Water Cooled", get(s, "water_cooled").and_then(Value::as_bool).map(yes_no)),
        ],
        Category::Monitor => vec![
            ("Screen Size", plain(s, "screen_size").map(|v| format!("{v}\""))),
            ("Resolution", resolution(s)),
            ("Refresh Rate", unit(s, "refresh_rate", " Hz")),
            ("Panel Type", plain(s, "panel_type")),
        ],
        Category::PcCase => vec![
            ("Form Factor", attr(s, SpecField::CaseFormFactors)),
            ("Side Panel", plain(s, "side_panel")),
            ("Max GPU Length", attr_unit(s, SpecField::CaseMaxGpuLength, " mm")),
        ],
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|(label, value)| value.map(|value| KeySpec { label, value }))
        .collect()
}

/// Display form of a raw value, case preserved.
fn display(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => n.as_f64().map(format_number),
        Value::Bool(b) => Some(yes_no(*b)),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(display).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Null | Value::Object(_) => None,
    }
}

fn yes_no(b: bool) -> String {
    let label = if b { "Yes" } else { "No" };
    label.to_string()
}

fn plain(s: &Value, path: &str) -> Option<String> {
    get(s, path).and_then(display)
}

/// First populated alias of `field`, in display form.
fn attr(s: &Value, field: SpecField) -> Option<String> {
    field.aliases().iter().find_map(|path| plain(s, path))
}

fn attr_unit(s: &Value, field: SpecField, suffix: &str) -> Option<String> {
    attr(s, field).map(|v| format!("{v}{suffix}"))
}

fn unit(s: &Value, path: &str, suffix: &str) -> Option<String> {
    plain(s, path).map(|v| format!("{v}{suffix}"))
}

fn range(s: &Value, min: &str, max: &str, suffix: &str) -> Option<String> {
    Some(format!("{} - {}{suffix}", plain(s, min)?, plain(s, max)?))
}

fn modules(s: &Value) -> Option<String> {
    let quantity = attr(s, SpecField::ModuleCount)?;
    let per_module = plain(s, "modules.capacity_gb_per_module")?;
    Some(format!("{quantity}x{per_module}GB"))
}

fn resolution(s: &Value) -> Option<String> {
    Some(format!(
        "{}x{}",
        plain(s, "resolution.horizontalRes")?,
        plain(s, "resolution.verticalRes")?
    ))
}
