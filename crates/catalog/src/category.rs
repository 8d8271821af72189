use core::str::FromStr;

use serde::{Deserialize, Serialize};

use rigcheck_core::DomainError;

/// Part category; a build holds at most one product per category.
///
/// Declaration order is the display order of build slots.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "CPUCooler")]
    CpuCooler,
    Motherboard,
    #[serde(rename = "RAM")]
    Ram,
    Storage,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "PCCase", alias = "Case")]
    PcCase,
    #[serde(rename = "PSU")]
    Psu,
    Monitor,
    CaseFan,
    NetworkCard,
    SoundCard,
    OpticalDrive,
    Keyboard,
    Mouse,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Cpu,
        Category::CpuCooler,
        Category::Motherboard,
        Category::Ram,
        Category::Storage,
        Category::Gpu,
        Category::PcCase,
        Category::Psu,
        Category::Monitor,
        Category::CaseFan,
        Category::NetworkCard,
        Category::SoundCard,
        Category::OpticalDrive,
        Category::Keyboard,
        Category::Mouse,
    ];

    /// Canonical catalog name (matches the serialized form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::CpuCooler => "CPUCooler",
            Category::Motherboard => "Motherboard",
            Category::Ram => "RAM",
            Category::Storage => "Storage",
            Category::Gpu => "GPU",
            Category::PcCase => "PCCase",
            Category::Psu => "PSU",
            Category::Monitor => "Monitor",
            Category::CaseFan => "CaseFan",
            Category::NetworkCard => "NetworkCard",
            Category::SoundCard => "SoundCard",
            Category::OpticalDrive => "OpticalDrive",
            Category::Keyboard => "Keyboard",
            Category::Mouse => "Mouse",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    /// Case-insensitive; `Case` is accepted for `PCCase`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("case") {
            return Ok(Category::PcCase);
        }
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::validation(format!("unknown category: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("pccase".parse::<Category>().unwrap(), Category::PcCase);
        assert_eq!("Case".parse::<Category>().unwrap(), Category::PcCase);
        assert_eq!(" cpucooler ".parse::<Category>().unwrap(), Category::CpuCooler);
        assert!("toaster".parse::<Category>().is_err());
    }

    #[test]
    fn serde_uses_catalog_names() {
        let json = serde_json::to_string(&Category::CpuCooler).unwrap();
        assert_eq!(json, "\"CPUCooler\"");
        let parsed: Category = serde_json::from_str("\"Case\"").unwrap();
        assert_eq!(parsed, Category::PcCase);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }
}
