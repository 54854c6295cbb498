//! Static per-crop configuration: heat-stress multipliers and variety
//! recommendations drawn from Maharashtra agri-department guidance.

use crate::error::{CropRiskError, Result};

/// The supported crops.
pub const CROPS: [&str; 5] = ["Rice", "Wheat", "Cotton", "Sugarcane", "Onion"];

const CROP_FACTORS: [(&str, f64); 5] = [
    ("Rice", 1.2),
    ("Wheat", 0.9),
    ("Cotton", 1.1),
    ("Sugarcane", 1.4),
    ("Onion", 1.0),
];

const VARIETIES: [(&str, [&str; 3]); 5] = [
    (
        "Rice",
        [
            "Sahbhagi Dhan (drought)",
            "Swarna-Sub1 (flood)",
            "MTU-7029 (stable)",
        ],
    ),
    (
        "Wheat",
        ["HD-3086 (heat)", "DBW-187 (drought)", "WH-1105 (early)"],
    ),
    (
        "Cotton",
        ["Bt Hybrid (drought)", "Suraj (heat)", "AKA-5 (stable)"],
    ),
    (
        "Sugarcane",
        ["Co-86032 (drought)", "Co-0238 (short)", "CoLk-8001 (early)"],
    ),
    (
        "Onion",
        [
            "Arka Khyati (heat)",
            "Bhima Kiran (drought)",
            "Phule Samarth (local)",
        ],
    ),
];

/// Fallback shown when a crop has no variety table entry.
pub const GENERIC_RECOMMENDATION: &str = "Consult agri officer";

/// Heat-stress multiplier applied during data generation. The generator only
/// sees the closed crop set, so a miss here is a programming error upstream.
pub fn crop_factor(crop: &str) -> Result<f64> {
    CROP_FACTORS
        .iter()
        .find(|(name, _)| *name == crop)
        .map(|(_, factor)| *factor)
        .ok_or_else(|| CropRiskError::UnknownCrop(crop.to_string()))
}

/// Variety recommendations for a crop, primary first. Unknown crops degrade
/// to a generic placeholder rather than failing the whole report.
pub fn variety_recommendations(crop: &str) -> Vec<String> {
    VARIETIES
        .iter()
        .find(|(name, _)| *name == crop)
        .map(|(_, list)| list.iter().map(|v| v.to_string()).collect())
        .unwrap_or_else(|| vec![GENERIC_RECOMMENDATION.to_string()])
}
