//! Risk scoring for SJA risk items.
//!
//! A risk score is `probability × severity`, both factors on a 1–5 scale,
//! giving an integer in `1..=25`. The qualitative [`RiskLevel`] is a pure
//! function of the score and is shared by every renderer.

use serde::{Deserialize, Serialize};

use crate::types::Rgb;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest valid probability / severity factor.
pub const MIN_FACTOR: i32 = 1;

/// Highest valid probability / severity factor.
pub const MAX_FACTOR: i32 = 5;

/// Highest possible risk score (`MAX_FACTOR * MAX_FACTOR`).
pub const MAX_SCORE: i32 = MAX_FACTOR * MAX_FACTOR;

/// Scores up to and including this value are [`RiskLevel::Low`].
pub const LOW_MAX_SCORE: i32 = 8;

/// Scores up to and including this value (and above [`LOW_MAX_SCORE`]) are
/// [`RiskLevel::Medium`]. Anything higher is [`RiskLevel::High`].
pub const MEDIUM_MAX_SCORE: i32 = 15;

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

/// Resolve the score of a risk item.
///
/// A stored score wins. Otherwise the score is `probability × severity`,
/// with a missing factor treated as 1.
pub fn risk_score(probability: Option<i32>, severity: Option<i32>, stored: Option<i32>) -> i32 {
    if let Some(score) = stored {
        return score;
    }
    probability.unwrap_or(MIN_FACTOR) * severity.unwrap_or(MIN_FACTOR)
}

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// Qualitative tier derived from a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a score: Low `<= 8`, Medium `9..=15`, High `> 15`.
    pub fn from_score(score: i32) -> Self {
        if score <= LOW_MAX_SCORE {
            Self::Low
        } else if score <= MEDIUM_MAX_SCORE {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Human-readable label for the level.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Display colour: green, orange, red.
    pub fn color(self) -> Rgb {
        match self {
            Self::Low => Rgb::GREEN,
            Self::Medium => Rgb::ORANGE,
            Self::High => Rgb::RED,
        }
    }

    /// Parse a free-form level label, as found in pre-aggregated weather
    /// data. Accepts the English labels and the Norwegian `lav` / `middels` /
    /// `høy`, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" | "lav" => Some(Self::Low),
            "medium" | "middels" | "moderate" => Some(Self::Medium),
            "high" | "høy" | "hoy" => Some(Self::High),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_grid_scores_and_levels() {
        for probability in MIN_FACTOR..=MAX_FACTOR {
            for severity in MIN_FACTOR..=MAX_FACTOR {
                let score = risk_score(Some(probability), Some(severity), None);
                assert_eq!(score, probability * severity);
                assert!((1..=MAX_SCORE).contains(&score));

                let level = RiskLevel::from_score(score);
                let expected = if score <= 8 {
                    RiskLevel::Low
                } else if score <= 15 {
                    RiskLevel::Medium
                } else {
                    RiskLevel::High
                };
                assert_eq!(level, expected, "score {score}");
            }
        }
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(RiskLevel::from_score(8), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(15), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(16), RiskLevel::High);
    }

    #[test]
    fn missing_factors_default_to_one() {
        assert_eq!(risk_score(None, None, None), 1);
        assert_eq!(risk_score(Some(4), None, None), 4);
        assert_eq!(risk_score(None, Some(3), None), 3);
    }

    #[test]
    fn stored_score_takes_precedence() {
        assert_eq!(risk_score(Some(1), Some(1), Some(20)), 20);
    }

    #[test]
    fn level_colors() {
        assert_eq!(RiskLevel::Low.color(), Rgb::GREEN);
        assert_eq!(RiskLevel::Medium.color(), Rgb::ORANGE);
        assert_eq!(RiskLevel::High.color(), Rgb::RED);
    }

    #[test]
    fn labels_parse_in_both_languages() {
        assert_eq!(RiskLevel::from_label("HIGH"), Some(RiskLevel::High));
        assert_eq!(RiskLevel::from_label("Middels"), Some(RiskLevel::Medium));
        assert_eq!(RiskLevel::from_label(" lav "), Some(RiskLevel::Low));
        assert_eq!(RiskLevel::from_label("extreme"), None);
    }
}
