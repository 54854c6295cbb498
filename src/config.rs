use crate::error::{CropRiskError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Risk classification policy.
///
/// Tier cutoffs and explainer weights are heuristics, not outputs of the
/// regression, so they live in configuration rather than code. The defaults
/// carry the canonical scheme; an alternate scheme is a YAML file away.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RiskPolicy {
    pub tiers: TierCutoffs,
    pub weights: FactorWeights,
    pub status: StatusThresholds,
    pub alerts: AlertThresholds,
    /// Predicted loss above which daily irrigation is recommended.
    pub daily_irrigation_loss: f64,
}

/// Lower bounds of the MODERATE/HIGH/CRITICAL tiers. Intervals are half-open
/// with the lower bound inclusive; anything below `moderate` is LOW.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TierCutoffs {
    pub moderate: f64,
    pub high: f64,
    pub critical: f64,
}

/// Fixed explainer weights, independent of the fitted coefficients.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FactorWeights {
    pub rainfall_deficit: f64,
    pub heat_stress: f64,
    pub water_stress: f64,
    pub humidity_imbalance: f64,
    /// Humidity percent treated as ideal; imbalance is distance from this.
    pub humidity_pivot: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StatusThresholds {
    /// Rainfall percent range reported as Normal.
    pub rainfall_normal: (f64, f64),
    /// Heatwave days above which the status is High.
    pub heatwave_high: f64,
    /// Dry days above which the status is Critical.
    pub dry_days_critical: f64,
    /// Humidity percent range reported as Optimal.
    pub humidity_optimal: (f64, f64),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Rainfall percent below which irrigation is critical.
    pub irrigation_rainfall: f64,
    /// Heatwave days above which shade nets are urgent.
    pub shade_net_heatwave: f64,
    /// Dry days above which mulching is required.
    pub mulching_dry_days: f64,
}

impl Default for TierCutoffs {
    fn default() -> Self {
        Self {
            moderate: 12.0,
            high: 28.0,
            critical: 45.0,
        }
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            rainfall_deficit: 0.38,
            heat_stress: 4.8,
            water_stress: 1.65,
            humidity_imbalance: 0.28,
            humidity_pivot: 68.0,
        }
    }
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            rainfall_normal: (90.0, 110.0),
            heatwave_high: 6.0,
            dry_days_critical: 14.0,
            humidity_optimal: (60.0, 75.0),
        }
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            irrigation_rainfall: 85.0,
            shade_net_heatwave: 6.0,
            mulching_dry_days: 14.0,
        }
    }
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            tiers: TierCutoffs::default(),
            weights: FactorWeights::default(),
            status: StatusThresholds::default(),
            alerts: AlertThresholds::default(),
            daily_irrigation_loss: 35.0,
        }
    }
}

impl RiskPolicy {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&contents)
            .map_err(|e| CropRiskError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Cutoffs must stay ordered or the tier intervals overlap.
    pub fn validate(&self) -> Result<()> {
        if self.tiers.moderate >= self.tiers.high || self.tiers.high >= self.tiers.critical {
            return Err(CropRiskError::Config(format!(
                "tier cutoffs must be strictly increasing, got {}/{}/{}",
                self.tiers.moderate, self.tiers.high, self.tiers.critical
            )));
        }
        Ok(())
    }
}
