//! Facet table and facet index builder.

use std::collections::{BTreeMap, BTreeSet};

use rigcheck_catalog::spec::read_paths;
use rigcheck_catalog::{Category, FieldKind, Normalized, Product, SpecField};

/// One checkbox group: a stable key, a UI label and the spec paths it reads.
///
/// `paths` are aliases tried in order, the same way [`SpecField`] reads work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetDef {
    pub key: &'static str,
    pub label: &'static str,
    pub paths: &'static [&'static str],
    pub kind: FieldKind,
}

impl FacetDef {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        paths: &'static [&'static str],
        kind: FieldKind,
    ) -> Self {
        Self { key, label, paths, kind }
    }

    /// Facet backed by a logical attribute, sharing its aliases with the rules.
    pub const fn field(key: &'static str, label: &'static str, field: SpecField) -> Self {
        Self::new(key, label, field.aliases(), field.kind())
    }

    /// Normalized value of this facet for one product.
    pub fn value(&self, product: &Product) -> Normalized {
        read_paths(product.specs(), self.paths, self.kind)
    }
}

/// Facet key -> distinct normalized values observed in a product list.
pub type FacetIndex = BTreeMap<&'static str, BTreeSet<String>>;

const fn text(key: &'static str, label: &'static str, paths: &'static [&'static str]) -> FacetDef {
    FacetDef::new(key, label, paths, FieldKind::Text)
}

const fn flag(key: &'static str, label: &'static str, paths: &'static [&'static str]) -> FacetDef {
    FacetDef::new(key, label, paths, FieldKind::Flag)
}

const MANUFACTURER: FacetDef = FacetDef::field("manufacturer", "Manufacturer", SpecField::Manufacturer);
const SOCKET: FacetDef = FacetDef::field("socket", "Socket", SpecField::Socket);
const FORM_FACTOR: FacetDef = FacetDef::field("form_factor", "Form Factor", SpecField::FormFactor);

static CPU_FACETS: [FacetDef; 3] = [
    SOCKET,
    text("microarchitecture", "Microarchitecture", &["microarchitecture"]),
    text("integrated_graphics", "Integrated Graphics", &["specifications.integratedGraphics.model"]),
];

static GPU_FACETS: [FacetDef; 4] = [
    text("chipset", "Chipset", &["chipset"]),
    text("memory_type", "Memory Type", &["memory_type"]),
    text("interface", "Interface", &["interface"]),
    MANUFACTURER,
];

static MOTHERBOARD_FACETS: [FacetDef; 5] = [
    SOCKET,
    FORM_FACTOR,
    text("chipset", "Chipset", &["chipset"]),
    FacetDef::field("ram_type", "RAM Type", SpecField::BoardRamType),
    MANUFACTURER,
];

static CASE_FACETS: [FacetDef; 3] = [
    FacetDef::field("form_factor", "Form Factor", SpecField::CaseFormFactors),
    text("side_panel", "Side Panel", &["side_panel"]),
    MANUFACTURER,
];

static COOLER_FACETS: [FacetDef; 2] = [MANUFACTURER, flag("water_cooled", "Water Cooled", &["water_cooled"])];

static RAM_FACETS: [FacetDef; 7] = [
    FacetDef::field("ram_type", "RAM Type", SpecField::RamType),
    FORM_FACTOR,
    FacetDef::field("ecc", "ECC", SpecField::Ecc),
    FacetDef::field("registered", "Registered", SpecField::Registered),
    MANUFACTURER,
    flag("heat_spreader", "Heat Spreader", &["heat_spreader"]),
    flag("rgb", "RGB", &["rgb"]),
];

static STORAGE_FACETS: [FacetDef; 5] = [
    text("type", "Type", &["type"]),
    FORM_FACTOR,
    text("interface", "Interface", &["interface"]),
    MANUFACTURER,
    flag("nvme", "NVMe", &["nvme"]),
];

static PSU_FACETS: [FacetDef; 4] = [
    FORM_FACTOR,
    text("efficiency_rating", "Efficiency Rating", &["efficiency_rating"]),
    text("modular", "Modular", &["modular"]),
    MANUFACTURER,
];

static MONITOR_FACETS: [FacetDef; 5] = [
    MANUFACTURER,
    text("refresh_rate", "Refresh Rate", &["refresh_rate"]),
    text("screen_size", "Screen Size", &["screen_size"]),
    text("vertical_res", "Vertical Resolution", &["resolution.verticalRes"]),
    text("horizontal_res", "Horizontal Resolution", &["resolution.horizontalRes"]),
];

/// Hand-authored facet table; categories without facets get an empty slice.
pub fn facets_for(category: Category) -> &'static [FacetDef] {
    match category {
        Category::Cpu => &CPU_FACETS,
        Category::Gpu => &GPU_FACETS,
        Category::Motherboard => &MOTHERBOARD_FACETS,
        Category::PcCase => &CASE_FACETS,
        Category::CpuCooler => &COOLER_FACETS,
        Category::Ram => &RAM_FACETS,
        Category::Storage => &STORAGE_FACETS,
        Category::Psu => &PSU_FACETS,
        Category::Monitor => &MONITOR_FACETS,
        _ => &[],
    }
}

/// Collect the distinct normalized values per facet.
///
/// Every declared facet gets an entry, possibly empty. Absent values are
/// skipped and array-valued specs contribute each element.
pub fn build_facets<'a>(products: impl IntoIterator<Item = &'a Product>, defs: &[FacetDef]) -> FacetIndex {
    let mut index: FacetIndex = defs.iter().map(|d| (d.key, BTreeSet::new())).collect();
    for product in products {
        for def in defs {
            let tokens = def.value(product).tokens();
            if tokens.is_empty() {
                continue;
            }
            index.entry(def.key).or_default().extend(tokens);
        }
    }
    index
}
