//! Ordinary least squares yield-loss model.
//!
//! OLS is deliberate: the coefficients map one-to-one onto the four weather
//! indicators, so the fitted model stays inspectable. Fit quality is reported
//! as a composite of train and held-out R².

use crate::error::{CropRiskError, Result};
use crate::models::{TrainingSample, WeatherObservation, FEATURE_COUNT};
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Seed for the internal 80/20 train/test shuffle.
const SPLIT_SEED: u64 = 42;

/// Held-out fraction of the training table.
const TEST_FRACTION: f64 = 0.2;

/// Weight of the train-partition R² in the composite quality score.
const TRAIN_R2_WEIGHT: f64 = 0.8;

/// Linear yield-loss model over the fixed feature order
/// [rainfall_pct, heatwave_days, dry_days, humidity].
///
/// Constructed untrained; `fit` computes everything up front and replaces the
/// state in one assignment, so a failed fit leaves the previous state intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldLossModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    is_fitted: bool,
    /// 0.8 x train R² + 0.2 x test R². Can go negative for a poor fit;
    /// never clamped.
    quality_score: f64,
}

impl YieldLossModel {
    pub fn new() -> Self {
        Self {
            coefficients: [0.0; FEATURE_COUNT],
            intercept: 0.0,
            is_fitted: false,
            quality_score: 0.0,
        }
    }

    /// Fit on a training table via the normal equations.
    ///
    /// Partitions 80/20 with a seeded shuffle, solves least squares on the
    /// train partition, and scores both partitions. Fails with `InvalidInput`
    /// on an empty table or a singular feature matrix.
    pub fn fit(&mut self, table: &[TrainingSample]) -> Result<()> {
        if table.is_empty() {
            return Err(CropRiskError::InvalidInput(
                "training table is empty".to_string(),
            ));
        }

        let mut indices: Vec<usize> = (0..table.len()).collect();
        indices.shuffle(&mut StdRng::seed_from_u64(SPLIT_SEED));

        let test_len = (table.len() as f64 * TEST_FRACTION) as usize;
        let (test_idx, train_idx) = indices.split_at(test_len);

        let (coefficients, intercept) = solve_least_squares(table, train_idx)?;

        let train_r2 = r_squared(table, train_idx, &coefficients, intercept);
        // Tables too small to hold out a test partition score on train only.
        let test_r2 = if test_idx.is_empty() {
            train_r2
        } else {
            r_squared(table, test_idx, &coefficients, intercept)
        };

        self.coefficients = coefficients;
        self.intercept = intercept;
        self.quality_score = TRAIN_R2_WEIGHT * train_r2 + (1.0 - TRAIN_R2_WEIGHT) * test_r2;
        self.is_fitted = true;

        tracing::info!(
            train_r2 = format_args!("{train_r2:.3}"),
            test_r2 = format_args!("{test_r2:.3}"),
            quality = format_args!("{:.3}", self.quality_score),
            samples = table.len(),
            "model fitted"
        );

        Ok(())
    }

    /// Predicted yield loss percent, clamped to [0, 100].
    pub fn predict(&self, weather: &WeatherObservation) -> Result<f64> {
        if !self.is_fitted {
            return Err(CropRiskError::NotFitted);
        }
        let raw = self
            .coefficients
            .iter()
            .zip(weather.features())
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.intercept;
        Ok(raw.clamp(0.0, 100.0))
    }

    pub fn coefficients(&self) -> Result<[f64; FEATURE_COUNT]> {
        if !self.is_fitted {
            return Err(CropRiskError::NotFitted);
        }
        Ok(self.coefficients)
    }

    pub fn intercept(&self) -> Result<f64> {
        if !self.is_fitted {
            return Err(CropRiskError::NotFitted);
        }
        Ok(self.intercept)
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    pub fn quality_score(&self) -> Result<f64> {
        if !self.is_fitted {
            return Err(CropRiskError::NotFitted);
        }
        Ok(self.quality_score)
    }

    /// Persist {coefficients, intercept, is_fitted, quality_score} as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "model saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&contents)?;
        tracing::info!(path = %path.display(), "model loaded");
        Ok(model)
    }
}

impl Default for YieldLossModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Solve the normal equations (XᵀX)β = Xᵀy over the selected rows, with an
/// appended intercept column. A singular XᵀX surfaces as `InvalidInput`.
fn solve_least_squares(
    table: &[TrainingSample],
    rows: &[usize],
) -> Result<([f64; FEATURE_COUNT], f64)> {
    if rows.is_empty() {
        return Err(CropRiskError::InvalidInput(
            "train partition is empty".to_string(),
        ));
    }

    let design = DMatrix::from_fn(rows.len(), FEATURE_COUNT + 1, |r, c| {
        if c == FEATURE_COUNT {
            1.0
        } else {
            table[rows[r]].weather.features()[c]
        }
    });
    let target = DVector::from_fn(rows.len(), |r, _| table[rows[r]].loss_pct);

    let xtx = design.transpose() * &design;
    let xty = design.transpose() * target;
    let beta = xtx.lu().solve(&xty).ok_or_else(|| {
        CropRiskError::InvalidInput("singular feature matrix, cannot fit".to_string())
    })?;

    let mut coefficients = [0.0; FEATURE_COUNT];
    for (i, c) in coefficients.iter_mut().enumerate() {
        *c = beta[i];
    }
    Ok((coefficients, beta[FEATURE_COUNT]))
}

fn r_squared(
    table: &[TrainingSample],
    rows: &[usize],
    coefficients: &[f64; FEATURE_COUNT],
    intercept: f64,
) -> f64 {
    let mean = rows.iter().map(|&i| table[i].loss_pct).sum::<f64>() / rows.len() as f64;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for &i in rows {
        let sample = &table[i];
        let predicted = coefficients
            .iter()
            .zip(sample.weather.features())
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + intercept;
        ss_res += (sample.loss_pct - predicted).powi(2);
        ss_tot += (sample.loss_pct - mean).powi(2);
    }

    if ss_tot == 0.0 {
        return 0.0;
    }
    1.0 - ss_res / ss_tot
}
