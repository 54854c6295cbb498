//! Prediction pipeline facade.
//!
//! The presentation layer builds one [`Predictor`] at startup (training runs
//! to completion before any prediction is served) and treats it as read-only
//! afterwards. Re-training means building a new `Predictor` and swapping it
//! in whole.

use crate::config::RiskPolicy;
use crate::datasources::{current_weather, CROPS, DISTRICTS};
use crate::error::{CropRiskError, Result};
use crate::logic::datagen::generate_training_data;
use crate::logic::{risk, YieldLossModel};
use crate::models::{RiskReport, WeatherObservation};

/// Where the weather for a prediction comes from: the static district lookup
/// or manual slider-style input.
#[derive(Debug, Clone)]
pub enum PredictionInput<'a> {
    District(&'a str),
    Manual(WeatherObservation),
}

#[derive(Debug)]
pub struct Predictor {
    model: YieldLossModel,
    policy: RiskPolicy,
}

impl Predictor {
    /// Generate a training table and fit the model, once, at startup.
    pub fn train(policy: RiskPolicy, samples_per_combo: usize, seed: u64) -> Result<Self> {
        policy.validate()?;
        tracing::info!(samples_per_combo, seed, "training crop risk model");
        let table = generate_training_data(samples_per_combo, seed)?;
        let mut model = YieldLossModel::new();
        model.fit(&table)?;
        Ok(Self { model, policy })
    }

    /// Wrap an already-fitted model (e.g. loaded from disk).
    pub fn with_model(policy: RiskPolicy, model: YieldLossModel) -> Result<Self> {
        policy.validate()?;
        if !model.is_fitted() {
            return Err(CropRiskError::NotFitted);
        }
        Ok(Self { model, policy })
    }

    pub fn model(&self) -> &YieldLossModel {
        &self.model
    }

    pub fn quality_score(&self) -> Result<f64> {
        self.model.quality_score()
    }

    pub fn districts(&self) -> &'static [&'static str] {
        &DISTRICTS
    }

    pub fn crops(&self) -> &'static [&'static str] {
        &CROPS
    }

    /// Full report for a district's current weather.
    pub fn predict_for_district(&self, district: &str, crop: &str) -> Result<RiskReport> {
        let weather = current_weather(district)?;
        let loss = self.model.predict(&weather)?;
        Ok(risk::analyze(
            &self.policy,
            Some(district),
            crop,
            &weather,
            loss,
            self.model.quality_score()?,
        ))
    }

    /// Full report for manually supplied weather.
    pub fn predict_for_weather(&self, weather: &WeatherObservation, crop: &str) -> Result<RiskReport> {
        validate_weather(weather)?;
        let loss = self.model.predict(weather)?;
        Ok(risk::analyze(
            &self.policy,
            None,
            crop,
            weather,
            loss,
            self.model.quality_score()?,
        ))
    }

    /// Presentation boundary: always returns displayable text, never panics.
    pub fn predict_and_report(&self, input: PredictionInput<'_>, crop: &str) -> String {
        let result = match input {
            PredictionInput::District(district) => self.predict_for_district(district, crop),
            PredictionInput::Manual(weather) => self.predict_for_weather(&weather, crop),
        };
        match result {
            Ok(report) => risk::format_report(&report),
            Err(e) => format!("Unable to generate risk report: {e}"),
        }
    }
}

fn validate_weather(weather: &WeatherObservation) -> Result<()> {
    let fields = [
        ("rainfall_pct", weather.rainfall_pct),
        ("heatwave_days", weather.heatwave_days),
        ("dry_days", weather.dry_days),
        ("humidity", weather.humidity),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(CropRiskError::InvalidInput(format!(
                "{name} must be a finite number"
            )));
        }
        if value < 0.0 {
            return Err(CropRiskError::InvalidInput(format!(
                "{name} must not be negative, got {value}"
            )));
        }
    }
    if weather.humidity > 100.0 {
        return Err(CropRiskError::InvalidInput(format!(
            "humidity must be a percent in [0, 100], got {}",
            weather.humidity
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn predictor() -> Predictor {
        Predictor::train(RiskPolicy::default(), 80, 42).unwrap()
    }

    #[test]
    fn end_to_end_quality_score_is_reproducible() {
        let a = predictor();
        let b = predictor();
        assert_relative_eq!(
            a.quality_score().unwrap(),
            b.quality_score().unwrap(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn district_report_renders_for_every_combination() {
        let predictor = predictor();
        for district in predictor.districts() {
            for crop in predictor.crops() {
                let report = predictor.predict_for_district(district, crop).unwrap();
                assert!((0.0..=100.0).contains(&report.loss_pct));
                assert_eq!(report.top_factors.len(), 3);
                assert!(!report.varieties.is_empty());
            }
        }
    }

    #[test]
    fn unknown_district_surfaces_as_error_text() {
        let predictor = predictor();
        let text = predictor.predict_and_report(PredictionInput::District("Kolhapur"), "Rice");
        assert!(text.contains("Unknown district"));
        assert!(text.contains("Kolhapur"));
    }

    #[test]
    fn unknown_crop_still_produces_a_report() {
        let predictor = predictor();
        let report = predictor.predict_for_district("Pune", "Millet").unwrap();
        assert_eq!(report.varieties, vec!["Consult agri officer".to_string()]);
    }

    #[test]
    fn manual_weather_out_of_domain_is_rejected() {
        let predictor = predictor();
        let negative = WeatherObservation::new(-10.0, 3.0, 5.0, 65.0);
        assert!(matches!(
            predictor.predict_for_weather(&negative, "Rice"),
            Err(CropRiskError::InvalidInput(_))
        ));

        let soggy = WeatherObservation::new(90.0, 3.0, 5.0, 130.0);
        assert!(matches!(
            predictor.predict_for_weather(&soggy, "Rice"),
            Err(CropRiskError::InvalidInput(_))
        ));

        let nan = WeatherObservation::new(f64::NAN, 3.0, 5.0, 65.0);
        let text = predictor.predict_and_report(PredictionInput::Manual(nan), "Rice");
        assert!(text.contains("Unable to generate risk report"));
    }

    #[test]
    fn zero_sample_training_fails_cleanly() {
        let err = Predictor::train(RiskPolicy::default(), 0, 42).unwrap_err();
        assert!(matches!(err, CropRiskError::InvalidInput(_)));
    }

    #[test]
    fn untrained_model_is_rejected_at_construction() {
        let err =
            Predictor::with_model(RiskPolicy::default(), YieldLossModel::new()).unwrap_err();
        assert!(matches!(err, CropRiskError::NotFitted));
    }

    #[test]
    fn report_text_contains_dashboard_and_actions() {
        let predictor = predictor();
        let text = predictor.predict_and_report(PredictionInput::District("Aurangabad"), "Rice");
        assert!(text.contains("PRODUCTION RISK REPORT"));
        assert!(text.contains("Weather Dashboard"));
        assert!(text.contains("Immediate Action Plan"));
        assert!(text.contains("R² Score"));
    }
}
