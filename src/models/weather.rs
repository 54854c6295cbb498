use serde::{Deserialize, Serialize};

/// Number of weather indicators fed to the regression.
pub const FEATURE_COUNT: usize = 4;

/// A single weather reading for one district and period.
///
/// Field order matters: the regression stores one coefficient per feature in
/// the order returned by [`WeatherObservation::features`]. Reordering fields
/// there silently changes what saved coefficients mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Observed rainfall as percent of the historical normal.
    pub rainfall_pct: f64,
    /// Count of days meeting the local heatwave threshold.
    pub heatwave_days: f64,
    /// Consecutive days without rain.
    pub dry_days: f64,
    /// Relative humidity percent.
    pub humidity: f64,
}

impl WeatherObservation {
    pub fn new(rainfall_pct: f64, heatwave_days: f64, dry_days: f64, humidity: f64) -> Self {
        Self {
            rainfall_pct,
            heatwave_days,
            dry_days,
            humidity,
        }
    }

    /// Feature vector in the fixed regression order:
    /// [rainfall_pct, heatwave_days, dry_days, humidity].
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.rainfall_pct,
            self.heatwave_days,
            self.dry_days,
            self.humidity,
        ]
    }
}

/// One labeled row of the synthetic training table.
///
/// District and crop select the generation baseline and heat-stress
/// multiplier; they are never fed to the regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSample {
    pub district: String,
    pub crop: String,
    pub weather: WeatherObservation,
    /// Synthetic yield-loss label, clamped to [0, 100].
    pub loss_pct: f64,
}
