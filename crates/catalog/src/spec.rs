//! Spec accessor: dotted-path lookup plus the declarative alias table.
//!
//! Vendor records for the same category disagree on field names and nesting
//! (`ram_type` vs `type`, `tdp` vs `specifications.tdp`). Every spec read in
//! the engine goes through a [`SpecField`], whose aliases are tried in order;
//! adding an alias is a one-line change to [`SpecField::aliases`].

use serde_json::Value;

use crate::normalize::{FieldKind, Normalized, normalize};

/// Resolve a dot-separated path inside a spec record.
///
/// Returns `None` as soon as an intermediate value is not indexable (objects by
/// key, arrays by numeric index), and for explicit `null` leaves. Never panics.
pub fn get<'a>(specs: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = specs;
    for key in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(key)?,
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    match current {
        Value::Null => None,
        value => Some(value),
    }
}

/// Trimmed, non-empty string at `path`, case preserved.
pub fn get_str<'a>(specs: &'a Value, path: &str) -> Option<&'a str> {
    get(specs, path)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Logical attributes read by rules, the power aggregator and search.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SpecField {
    Socket,
    RamType,
    BoardRamType,
    Registered,
    BoardSupportsRegistered,
    Ecc,
    BoardSupportsEcc,
    RamCapacity,
    BoardMaxMemory,
    ModuleCount,
    MemorySlots,
    CoolerSockets,
    CoolerHeight,
    CaseMaxCoolerHeight,
    FormFactor,
    CaseFormFactors,
    GpuLength,
    CaseMaxGpuLength,
    Wattage,
    Tdp,
    Supports3d,
    DisplayName,
    Manufacturer,
    Series,
    Model,
}

impl SpecField {
    /// Candidate paths, most specific first.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            SpecField::Socket => &["socket", "cpu_socket"],
            SpecField::RamType => &["ram_type", "type"],
            SpecField::BoardRamType => &["memory.ram_type", "ram_type"],
            SpecField::Registered => &["registered"],
            SpecField::BoardSupportsRegistered => {
                &["supports_registered_ram", "memory.supports_registered_ram"]
            }
            SpecField::Ecc => &["ecc"],
            SpecField::BoardSupportsEcc => &["supports_ecc_ram", "memory.supports_ecc_ram"],
            SpecField::RamCapacity => &["capacity", "capacity_gb"],
            SpecField::BoardMaxMemory => &["memory.max_capacity_gb", "memory.max_capacity", "max_memory_gb"],
            SpecField::ModuleCount => &["modules.quantity", "module_count"],
            SpecField::MemorySlots => &["memory.slots", "memory_slots"],
            SpecField::CoolerSockets => &["cpu_sockets", "sockets"],
            SpecField::CoolerHeight => &["height_mm", "height"],
            SpecField::CaseMaxCoolerHeight => {
                &["max_cpu_cooler_height_mm", "max_cooler_height_mm", "max_cooler_height"]
            }
            SpecField::FormFactor => &["form_factor", "formFactor"],
            SpecField::CaseFormFactors => &["form_factor", "formFactor", "motherboard_form_factors"],
            SpecField::GpuLength => &["length_mm", "length"],
            SpecField::CaseMaxGpuLength => {
                &["max_video_card_length_mm", "max_gpu_length_mm", "max_gpu_length"]
            }
            SpecField::Wattage => &["wattage", "wattage_w"],
            SpecField::Tdp => &["tdp", "specifications.tdp", "tdp_w"],
            SpecField::Supports3d => &["supports3D", "supports_3d"],
            SpecField::DisplayName => &["metadata.name", "display_name", "name"],
            SpecField::Manufacturer => &["manufacturer", "metadata.manufacturer"],
            SpecField::Series => &["series", "metadata.series"],
            SpecField::Model => &["model", "metadata.model"],
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            SpecField::Registered
            | SpecField::BoardSupportsRegistered
            | SpecField::Ecc
            | SpecField::BoardSupportsEcc
            | SpecField::Supports3d => FieldKind::Flag,
            SpecField::RamCapacity
            | SpecField::BoardMaxMemory
            | SpecField::ModuleCount
            | SpecField::MemorySlots
            | SpecField::CoolerHeight
            | SpecField::CaseMaxCoolerHeight
            | SpecField::GpuLength
            | SpecField::CaseMaxGpuLength
            | SpecField::Wattage
            | SpecField::Tdp => FieldKind::Numeric,
            SpecField::CoolerSockets | SpecField::CaseFormFactors => FieldKind::MultiText,
            SpecField::Socket
            | SpecField::RamType
            | SpecField::BoardRamType
            | SpecField::FormFactor
            | SpecField::DisplayName
            | SpecField::Manufacturer
            | SpecField::Series
            | SpecField::Model => FieldKind::Text,
        }
    }
}

/// Normalized value of `field`: the first alias that normalizes to a present
/// value wins.
pub fn read(specs: &Value, field: SpecField) -> Normalized {
    read_paths(specs, field.aliases(), field.kind())
}

/// Like [`read`], for an ad-hoc alias list.
pub fn read_paths(specs: &Value, paths: &[&str], kind: FieldKind) -> Normalized {
    paths
        .iter()
        .map(|path| normalize(get(specs, path), kind))
        .find(Normalized::is_present)
        .unwrap_or(Normalized::Absent)
}

/// First populated alias of `field` as raw text (case preserved).
pub fn read_str(specs: &Value, field: SpecField) -> Option<&str> {
    field.aliases().iter().find_map(|path| get_str(specs, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_walks_nested_records() {
        let specs = json!({"memory": {"ram_type": "DDR5", "slots": 4}});
        assert_eq!(get(&specs, "memory.ram_type"), Some(&json!("DDR5")));
        assert_eq!(get(&specs, "memory.slots"), Some(&json!(4)));
    }

    #[test]
    fn get_stops_on_non_records() {
        let specs = json!({"memory": "DDR5", "nothing": null});
        assert_eq!(get(&specs, "memory.ram_type"), None);
        assert_eq!(get(&specs, "nothing.deeper"), None);
        assert_eq!(get(&specs, "nothing"), None);
        assert_eq!(get(&specs, "missing.path.entirely"), None);
        assert_eq!(get(&Value::Null, "socket"), None);
        assert_eq!(get(&specs, ""), None);
    }

    #[test]
    fn get_indexes_arrays_numerically() {
        let specs = json!({"ports": [{"kind": "hdmi"}]});
        assert_eq!(get(&specs, "ports.0.kind"), Some(&json!("hdmi")));
        assert_eq!(get(&specs, "ports.x.kind"), None);
        assert_eq!(get(&specs, "ports.3.kind"), None);
    }

    #[test]
    fn read_falls_back_through_aliases() {
        let top = json!({"ram_type": "DDR4"});
        let legacy = json!({"type": "ddr4 "});
        let empty_first = json!({"ram_type": "", "type": "DDR4"});
        for specs in [top, legacy, empty_first] {
            assert_eq!(read(&specs, SpecField::RamType), Normalized::Text("ddr4".into()));
        }
    }

    #[test]
    fn read_finds_nested_tdp() {
        let specs = json!({"specifications": {"tdp": 125}});
        assert_eq!(read(&specs, SpecField::Tdp), Normalized::Number(125.0));
        let text = json!({"tdp": "65 W"});
        assert_eq!(read(&text, SpecField::Tdp), Normalized::Number(65.0));
    }

    #[test]
    fn read_str_keeps_case() {
        let specs = json!({"metadata": {"name": "  Kingston Fury DDR5 32GB "}});
        assert_eq!(read_str(&specs, SpecField::DisplayName), Some("Kingston Fury DDR5 32GB"));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_json() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::from),
                any::<i64>().prop_map(Value::from),
                "[a-z0-9 ,.]{0,12}".prop_map(Value::from),
            ];
            leaf.prop_recursive(4, 32, 4, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
                    prop::collection::btree_map("[a-z_]{1,6}", inner, 0..4)
                        .prop_map(|m| Value::Object(m.into_iter().collect())),
                ]
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: lookups never panic, whatever the record shape.
            #[test]
            fn lookups_never_panic(specs in arb_json(), path in "[a-z_0-9]{0,6}(\\.[a-z_0-9]{0,6}){0,3}") {
                let _ = get(&specs, &path);
                let _ = read(&specs, SpecField::CoolerSockets);
                let _ = read(&specs, SpecField::Tdp);
            }
        }
    }
}
