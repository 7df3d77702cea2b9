//! Hazard (GHS) and PPE (ISO 7010) pictogram lookup tables.
//!
//! Chemical products carry symbol codes as free strings. These tables map a
//! recognised code to its enum value and to the icon file under the icon
//! directory. Hazard icons are stored as WebP, PPE icons as PNG.

use serde::Serialize;

/// On-disk format of an icon file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFormat {
    Webp,
    Png,
}

// ---------------------------------------------------------------------------
// Hazard symbols (GHS01-GHS09)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HazardSymbol {
    Explosive,
    Flammable,
    Oxidizing,
    GasUnderPressure,
    Corrosive,
    Toxic,
    Harmful,
    HealthHazard,
    EnvironmentalHazard,
}

impl HazardSymbol {
    pub const ALL: [HazardSymbol; 9] = [
        Self::Explosive,
        Self::Flammable,
        Self::Oxidizing,
        Self::GasUnderPressure,
        Self::Corrosive,
        Self::Toxic,
        Self::Harmful,
        Self::HealthHazard,
        Self::EnvironmentalHazard,
    ];

    /// Parse an enum name (`FLAMMABLE`) or GHS code (`GHS02`), case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_uppercase().replace(['-', ' '], "_");
        let symbol = match normalized.as_str() {
            "EXPLOSIVE" | "GHS01" => Self::Explosive,
            "FLAMMABLE" | "GHS02" => Self::Flammable,
            "OXIDIZING" | "GHS03" => Self::Oxidizing,
            "GAS_UNDER_PRESSURE" | "PRESSURIZED_GAS" | "GHS04" => Self::GasUnderPressure,
            "CORROSIVE" | "GHS05" => Self::Corrosive,
            "TOXIC" | "ACUTE_TOXIC" | "GHS06" => Self::Toxic,
            "HARMFUL" | "IRRITANT" | "GHS07" => Self::Harmful,
            "HEALTH_HAZARD" | "HEALTH_DANGER" | "GHS08" => Self::HealthHazard,
            "ENVIRONMENTAL_HAZARD" | "ENVIRONMENTAL" | "GHS09" => Self::EnvironmentalHazard,
            _ => return None,
        };
        Some(symbol)
    }

    pub fn ghs_code(self) -> &'static str {
        match self {
            Self::Explosive => "GHS01",
            Self::Flammable => "GHS02",
            Self::Oxidizing => "GHS03",
            Self::GasUnderPressure => "GHS04",
            Self::Corrosive => "GHS05",
            Self::Toxic => "GHS06",
            Self::Harmful => "GHS07",
            Self::HealthHazard => "GHS08",
            Self::EnvironmentalHazard => "GHS09",
        }
    }

    /// Icon path relative to the icon directory.
    pub fn icon_path(self) -> &'static str {
        match self {
            Self::Explosive => "faremerker/eksplosjonsfarlig.webp",
            Self::Flammable => "faremerker/brannfarlig.webp",
            Self::Oxidizing => "faremerker/oksiderende.webp",
            Self::GasUnderPressure => "faremerker/gass_under_trykk.webp",
            Self::Corrosive => "faremerker/etsende.webp",
            Self::Toxic => "faremerker/giftig.webp",
            Self::Harmful => "faremerker/helsefare.webp",
            Self::HealthHazard => "faremerker/kronisk_helsefarlig.webp",
            Self::EnvironmentalHazard => "faremerker/miljofare.webp",
        }
    }

    pub fn icon_format(self) -> IconFormat {
        IconFormat::Webp
    }
}

// ---------------------------------------------------------------------------
// PPE symbols (ISO 7010 mandatory action signs)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PpeSymbol {
    HearingProtection,
    EyeProtection,
    SafetyFootwear,
    ProtectiveGloves,
    ProtectiveClothing,
    FaceShield,
    SafetyHelmet,
    RespiratoryProtection,
    SafetyHarness,
}

impl PpeSymbol {
    pub const ALL: [PpeSymbol; 9] = [
        Self::HearingProtection,
        Self::EyeProtection,
        Self::SafetyFootwear,
        Self::ProtectiveGloves,
        Self::ProtectiveClothing,
        Self::FaceShield,
        Self::SafetyHelmet,
        Self::RespiratoryProtection,
        Self::SafetyHarness,
    ];

    /// Parse an enum name (`EYE_PROTECTION`) or ISO 7010 code (`M004`).
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_uppercase().replace(['-', ' '], "_");
        let symbol = match normalized.as_str() {
            "HEARING_PROTECTION" | "M003" => Self::HearingProtection,
            "EYE_PROTECTION" | "M004" => Self::EyeProtection,
            "SAFETY_FOOTWEAR" | "FOOT_PROTECTION" | "M008" => Self::SafetyFootwear,
            "PROTECTIVE_GLOVES" | "HAND_PROTECTION" | "GLOVES" | "M009" => Self::ProtectiveGloves,
            "PROTECTIVE_CLOTHING" | "M010" => Self::ProtectiveClothing,
            "FACE_SHIELD" | "M013" => Self::FaceShield,
            "SAFETY_HELMET" | "HEAD_PROTECTION" | "M014" => Self::SafetyHelmet,
            "RESPIRATORY_PROTECTION" | "M017" => Self::RespiratoryProtection,
            "SAFETY_HARNESS" | "M018" => Self::SafetyHarness,
            _ => return None,
        };
        Some(symbol)
    }

    pub fn iso_code(self) -> &'static str {
        match self {
            Self::HearingProtection => "M003",
            Self::EyeProtection => "M004",
            Self::SafetyFootwear => "M008",
            Self::ProtectiveGloves => "M009",
            Self::ProtectiveClothing => "M010",
            Self::FaceShield => "M013",
            Self::SafetyHelmet => "M014",
            Self::RespiratoryProtection => "M017",
            Self::SafetyHarness => "M018",
        }
    }

    /// Icon path relative to the icon directory.
    pub fn icon_path(self) -> &'static str {
        match self {
            Self::HearingProtection => "ppe/ISO_7010_M003.png",
            Self::EyeProtection => "ppe/ISO_7010_M004.png",
            Self::SafetyFootwear => "ppe/ISO_7010_M008.png",
            Self::ProtectiveGloves => "ppe/ISO_7010_M009.png",
            Self::ProtectiveClothing => "ppe/ISO_7010_M010.png",
            Self::FaceShield => "ppe/ISO_7010_M013.png",
            Self::SafetyHelmet => "ppe/ISO_7010_M014.png",
            Self::RespiratoryProtection => "ppe/ISO_7010_M017.png",
            Self::SafetyHarness => "ppe/ISO_7010_M018.png",
        }
    }

    pub fn icon_format(self) -> IconFormat {
        IconFormat::Png
    }
}
