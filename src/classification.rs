// 🏷️ Merger Classification - stake thresholds and leverage health
//
// Stake tiers (first match wins, strict comparisons):
//   stake_a > 65  → Acquisition
//   stake_a > 50  → Majority Acquisition
//   otherwise     → Merger of Equals
//
// Leverage: post-merger D/E < 1 is healthy, anything else is high risk.

use serde::{Deserialize, Serialize};

pub const ACQUISITION_THRESHOLD_PCT: f64 = 65.0;
pub const MAJORITY_THRESHOLD_PCT: f64 = 50.0;
pub const HEALTHY_DE_CEILING: f64 = 1.0;

// ============================================================================
// MERGER TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergerType {
    Acquisition,
    MajorityAcquisition,
    MergerOfEquals,
}

impl MergerType {
    pub fn label(&self) -> &'static str {
        match self {
            MergerType::Acquisition => "Acquisition",
            MergerType::MajorityAcquisition => "Majority Acquisition",
            MergerType::MergerOfEquals => "Merger of Equals",
        }
    }

    pub fn stake_comment(&self) -> &'static str {
        match self {
            MergerType::Acquisition => {
                "Company A holds a majority stake, indicating a clear acquisition."
            }
            MergerType::MajorityAcquisition => {
                "Company A retains control, but the merger is closer to a partnership."
            }
            MergerType::MergerOfEquals => {
                "Stake percentages suggest a merger of equals, with balanced control."
            }
        }
    }
}

impl std::fmt::Display for MergerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify the deal from Company A's post-merger stake (percent, 0-100).
pub fn classify_merger(stake_a_pct: f64) -> (MergerType, String) {
    let merger_type = if stake_a_pct > ACQUISITION_THRESHOLD_PCT {
        MergerType::Acquisition
    } else if stake_a_pct > MAJORITY_THRESHOLD_PCT {
        MergerType::MajorityAcquisition
    } else {
        MergerType::MergerOfEquals
    };

    (merger_type, merger_type.stake_comment().to_string())
}

// ============================================================================
// LEVERAGE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeverageRisk {
    Healthy,
    High,
}

impl LeverageRisk {
    pub fn from_de(post_merger_de: f64) -> Self {
        if post_merger_de < HEALTHY_DE_CEILING {
            LeverageRisk::Healthy
        } else {
            LeverageRisk::High
        }
    }

    pub fn comment(&self) -> &'static str {
        match self {
            LeverageRisk::Healthy => {
                "The post-merger debt-to-equity ratio is within a healthy range."
            }
            LeverageRisk::High => {
                "High post-merger D/E ratio indicates significant leverage, posing financial risks."
            }
        }
    }
}

pub fn classify_leverage(post_merger_de: f64) -> String {
    LeverageRisk::from_de(post_merger_de).comment().to_string()
}
