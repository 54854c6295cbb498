//! Static per-district weather tables.
//!
//! Stands in for a live IMD feed: one table of long-run generation baselines
//! and one table of "current" readings. District names are a closed set;
//! lookups against anything else fail loudly since no sane default exists.

use crate::error::{CropRiskError, Result};
use crate::models::WeatherObservation;

/// The supported Maharashtra districts.
pub const DISTRICTS: [&str; 5] = ["Pune", "Nagpur", "Mumbai", "Nashik", "Aurangabad"];

/// Long-run district means used as the generation baseline.
#[derive(Debug, Clone, Copy)]
pub struct DistrictBaseline {
    pub rainfall_pct: f64,
    pub heatwave_days: f64,
    pub dry_days: f64,
    pub humidity: f64,
}

const BASELINES: [(&str, DistrictBaseline); 5] = [
    (
        "Pune",
        DistrictBaseline {
            rainfall_pct: 102.0,
            heatwave_days: 5.2,
            dry_days: 11.0,
            humidity: 68.0,
        },
    ),
    (
        "Nagpur",
        DistrictBaseline {
            rainfall_pct: 92.0,
            heatwave_days: 7.8,
            dry_days: 14.0,
            humidity: 65.0,
        },
    ),
    (
        "Mumbai",
        DistrictBaseline {
            rainfall_pct: 118.0,
            heatwave_days: 2.8,
            dry_days: 6.0,
            humidity: 78.0,
        },
    ),
    (
        "Nashik",
        DistrictBaseline {
            rainfall_pct: 85.0,
            heatwave_days: 6.5,
            dry_days: 16.0,
            humidity: 62.0,
        },
    ),
    (
        "Aurangabad",
        DistrictBaseline {
            rainfall_pct: 78.0,
            heatwave_days: 8.2,
            dry_days: 19.0,
            humidity: 60.0,
        },
    ),
];

// Current-season readings, distinct from the long-run baselines above.
const CURRENT: [(&str, [f64; 4]); 5] = [
    ("Pune", [92.0, 6.2, 13.0, 70.0]),
    ("Nagpur", [85.0, 8.1, 16.0, 66.0]),
    ("Mumbai", [108.0, 3.5, 8.0, 80.0]),
    ("Nashik", [79.0, 7.3, 19.0, 63.0]),
    ("Aurangabad", [74.0, 9.2, 22.0, 61.0]),
];

/// Generation baseline for a district.
pub fn district_baseline(district: &str) -> Result<DistrictBaseline> {
    BASELINES
        .iter()
        .find(|(name, _)| *name == district)
        .map(|(_, baseline)| *baseline)
        .ok_or_else(|| CropRiskError::UnknownDistrict(district.to_string()))
}

/// Current weather reading for a district.
pub fn current_weather(district: &str) -> Result<WeatherObservation> {
    CURRENT
        .iter()
        .find(|(name, _)| *name == district)
        .map(|(_, [rain, heat, dry, hum])| WeatherObservation::new(*rain, *heat, *dry, *hum))
        .ok_or_else(|| CropRiskError::UnknownDistrict(district.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_district_has_baseline_and_current_weather() {
        for district in DISTRICTS {
            assert!(district_baseline(district).is_ok(), "{district}");
            assert!(current_weather(district).is_ok(), "{district}");
        }
    }

    #[test]
    fn unknown_district_fails_loudly() {
        let err = current_weather("Kolhapur").unwrap_err();
        assert!(matches!(
            err,
            CropRiskError::UnknownDistrict(ref d) if d == "Kolhapur"
        ));
        assert!(district_baseline("Kolhapur").is_err());
    }

    #[test]
    fn current_weather_values_match_table() {
        let pune = current_weather("Pune").unwrap();
        assert_eq!(pune.rainfall_pct, 92.0);
        assert_eq!(pune.heatwave_days, 6.2);
        assert_eq!(pune.dry_days, 13.0);
        assert_eq!(pune.humidity, 70.0);
    }
}
