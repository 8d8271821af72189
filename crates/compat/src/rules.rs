//! Canonical compatibility rule table.
//!
//! Each rule is an independent record: identifier, the categories it reads, a
//! human-readable reason and a pure check. The evaluator runs them uniformly in
//! table order.

use serde::Serialize;

use rigcheck_catalog::{Category, Normalized, Product, SpecField};

use crate::power::PowerModel;
use crate::selection::Selection;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    CpuBoardSocket,
    RamBoardType,
    RamRegistered,
    RamEcc,
    RamCapacity,
    RamModuleSlots,
    CoolerSocket,
    CoolerHeight,
    CaseFormFactor,
    GpuLength,
    PsuWattage,
}

impl RuleId {
    /// Position in the canonical table (1-based).
    pub fn number(self) -> u8 {
        match self {
            RuleId::CpuBoardSocket => 1,
            RuleId::RamBoardType => 2,
            RuleId::RamRegistered => 3,
            RuleId::RamEcc => 4,
            RuleId::RamCapacity => 5,
            RuleId::RamModuleSlots => 6,
            RuleId::CoolerSocket => 7,
            RuleId::CoolerHeight => 8,
            RuleId::CaseFormFactor => 9,
            RuleId::GpuLength => 10,
            RuleId::PsuWattage => 11,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::CpuBoardSocket => "cpu_board_socket",
            RuleId::RamBoardType => "ram_board_type",
            RuleId::RamRegistered => "ram_registered",
            RuleId::RamEcc => "ram_ecc",
            RuleId::RamCapacity => "ram_capacity",
            RuleId::RamModuleSlots => "ram_module_slots",
            RuleId::CoolerSocket => "cooler_socket",
            RuleId::CoolerHeight => "cooler_height",
            RuleId::CaseFormFactor => "case_form_factor",
            RuleId::GpuLength => "gpu_length",
            RuleId::PsuWattage => "psu_wattage",
        }
    }
}

impl core::fmt::Display for RuleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single rule against a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pass,
    /// Present-and-violated, with the offending values.
    Fail(String),
    /// A slot is empty or a side of the comparison is absent.
    NotApplicable,
}

pub type RuleCheck = fn(&Selection<'_>, &PowerModel) -> Outcome;

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    pub reads: &'static [Category],
    pub reason: &'static str,
    check: RuleCheck,
}

impl Rule {
    pub const fn new(id: RuleId, reads: &'static [Category], reason: &'static str, check: RuleCheck) -> Self {
        Self { id, reads, reason, check }
    }

    pub fn check(&self, selection: &Selection<'_>, power: &PowerModel) -> Outcome {
        (self.check)(selection, power)
    }
}

pub static CANONICAL_RULES: [Rule; 11] = [
    Rule::new(
        RuleId::CpuBoardSocket,
        &[Category::Cpu, Category::Motherboard],
        "CPU socket does not match motherboard socket",
        cpu_board_socket,
    ),
    Rule::new(
        RuleId::RamBoardType,
        &[Category::Ram, Category::Motherboard],
        "memory type is not supported by the motherboard",
        ram_board_type,
    ),
    Rule::new(
        RuleId::RamRegistered,
        &[Category::Ram, Category::Motherboard],
        "registered memory is not supported by the motherboard",
        ram_registered,
    ),
    Rule::new(
        RuleId::RamEcc,
        &[Category::Ram, Category::Motherboard],
        "ECC memory is not supported by the motherboard",
        ram_ecc,
    ),
    Rule::new(
        RuleId::RamCapacity,
        &[Category::Ram, Category::Motherboard],
        "memory capacity exceeds the motherboard maximum",
        ram_capacity,
    ),
    Rule::new(
        RuleId::RamModuleSlots,
        &[Category::Ram, Category::Motherboard],
        "more memory modules than motherboard slots",
        ram_module_slots,
    ),
    Rule::new(
        RuleId::CoolerSocket,
        &[Category::CpuCooler, Category::Cpu],
        "cooler does not support the CPU socket",
        cooler_socket,
    ),
    Rule::new(
        RuleId::CoolerHeight,
        &[Category::CpuCooler, Category::PcCase],
        "cooler is taller than the case allows",
        cooler_height,
    ),
    Rule::new(
        RuleId::CaseFormFactor,
        &[Category::PcCase, Category::Motherboard],
        "case does not fit the motherboard form factor",
        case_form_factor,
    ),
    Rule::new(
        RuleId::GpuLength,
        &[Category::Gpu, Category::PcCase],
        "graphics card is longer than the case allows",
        gpu_length,
    ),
    Rule::new(
        RuleId::PsuWattage,
        &[Category::Psu],
        "power supply wattage is below estimated system draw",
        psu_wattage,
    ),
];

fn pair<'a>(selection: &Selection<'a>, a: Category, b: Category) -> Option<(&'a Product, &'a Product)> {
    Some((selection.get(a)?, selection.get(b)?))
}

/// Fails when both sides are present and share no token.
fn tokens_agree(left: &Normalized, right: &Normalized) -> Outcome {
    if left.is_absent() || right.is_absent() {
        return Outcome::NotApplicable;
    }
    let (l, r) = (left.tokens(), right.tokens());
    if l.is_disjoint(&r) {
        Outcome::Fail(format!("{l:?} vs {r:?}"))
    } else {
        Outcome::Pass
    }
}

/// Fails when `value` is present, larger than a present `limit`.
fn at_most(value: &Normalized, limit: &Normalized) -> Outcome {
    match (value.as_number(), limit.as_number()) {
        (Some(v), Some(max)) if v > max => Outcome::Fail(format!("{v} > {max}")),
        (Some(_), Some(_)) => Outcome::Pass,
        _ => Outcome::NotApplicable,
    }
}

/// Fails when the part needs a feature (`true`) the board explicitly lacks (`false`).
fn feature_supported(needs: &Normalized, supported: &Normalized) -> Outcome {
    match (needs.as_flag(), supported.as_flag()) {
        (Some(true), Some(false)) => Outcome::Fail("required but unsupported".to_string()),
        (Some(_), Some(_)) => Outcome::Pass,
        _ => Outcome::NotApplicable,
    }
}

fn cpu_board_socket(s: &Selection<'_>, _: &PowerModel) -> Outcome {
    let Some((cpu, board)) = pair(s, Category::Cpu, Category::Motherboard) else {
        return Outcome::NotApplicable;
    };
    tokens_agree(&cpu.read(SpecField::Socket), &board.read(SpecField::Socket))
}

fn ram_board_type(s: &Selection<'_>, _: &PowerModel) -> Outcome {
    let Some((ram, board)) = pair(s, Category::Ram, Category::Motherboard) else {
        return Outcome::NotApplicable;
    };
    tokens_agree(&ram.read(SpecField::RamType), &board.read(SpecField::BoardRamType))
}

fn ram_registered(s: &Selection<'_>, _: &PowerModel) -> Outcome {
    let Some((ram, board)) = pair(s, Category::Ram, Category::Motherboard) else {
        return Outcome::NotApplicable;
    };
    feature_supported(
        &ram.read(SpecField::Registered),
        &board.read(SpecField::BoardSupportsRegistered),
    )
}

fn ram_ecc(s: &Selection<'_>, _: &PowerModel) -> Outcome {
    let Some((ram, board)) = pair(s, Category::Ram, Category::Motherboard) else {
        return Outcome::NotApplicable;
    };
    feature_supported(&ram.read(SpecField::Ecc), &board.read(SpecField::BoardSupportsEcc))
}

fn ram_capacity(s: &Selection<'_>, _: &PowerModel) -> Outcome {
    let Some((ram, board)) = pair(s, Category::Ram, Category::Motherboard) else {
        return Outcome::NotApplicable;
    };
    at_most(&ram.read(SpecField::RamCapacity), &board.read(SpecField::BoardMaxMemory))
}

fn ram_module_slots(s: &Selection<'_>, _: &PowerModel) -> Outcome {
    let Some((ram, board)) = pair(s, Category::Ram, Category::Motherboard) else {
        return Outcome::NotApplicable;
    };
    at_most(&ram.read(SpecField::ModuleCount), &board.read(SpecField::MemorySlots))
}

fn cooler_socket(s: &Selection<'_>, _: &PowerModel) -> Outcome {
    let Some((cooler, cpu)) = pair(s, Category::CpuCooler, Category::Cpu) else {
        return Outcome::NotApplicable;
    };
    tokens_agree(&cooler.read(SpecField::CoolerSockets), &cpu.read(SpecField::Socket))
}

fn cooler_height(s: &Selection<'_>, _: &PowerModel) -> Outcome {
    let Some((cooler, case)) = pair(s, Category::CpuCooler, Category::PcCase) else {
        return Outcome::NotApplicable;
    };
    at_most(&cooler.read(SpecField::CoolerHeight), &case.read(SpecField::CaseMaxCoolerHeight))
}

fn case_form_factor(s: &Selection<'_>, _: &PowerModel) -> Outcome {
    let Some((case, board)) = pair(s, Category::PcCase, Category::Motherboard) else {
        return Outcome::NotApplicable;
    };
    tokens_agree(&case.read(SpecField::CaseFormFactors), &board.read(SpecField::FormFactor))
}

fn gpu_length(s: &Selection<'_>, _: &PowerModel) -> Outcome {
    let Some((gpu, case)) = pair(s, Category::Gpu, Category::PcCase) else {
        return Outcome::NotApplicable;
    };
    at_most(&gpu.read(SpecField::GpuLength), &case.read(SpecField::CaseMaxGpuLength))
}

fn psu_wattage(s: &Selection<'_>, power: &PowerModel) -> Outcome {
    let Some(psu) = s.get(Category::Psu) else {
        return Outcome::NotApplicable;
    };
    // a PSU alone has nothing to power
    if s.len() < 2 {
        return Outcome::NotApplicable;
    }
    let Some(wattage) = psu.read(SpecField::Wattage).as_number() else {
        return Outcome::NotApplicable;
    };
    let draw = power.total_draw(s);
    if wattage < draw {
        Outcome::Fail(format!("{wattage} W < {draw} W"))
    } else {
        Outcome::Pass
    }
}
