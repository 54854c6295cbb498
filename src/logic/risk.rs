//! Risk classification and farmer-facing explanation.
//!
//! Tiering and the factor breakdown are deliberate heuristics, separate from
//! the fitted coefficients: the report has to stay readable and stable even
//! when a refit shifts the regression weights. All cutoffs come from
//! [`RiskPolicy`].

use crate::config::RiskPolicy;
use crate::models::{
    IrrigationSchedule, ParameterStatus, RiskFactor, RiskFactorKind, RiskReport, RiskTier,
    WeatherAlert, WeatherObservation, WeatherStatus,
};
use chrono::Utc;

/// Map a predicted loss percent onto a severity tier.
///
/// Intervals are half-open with the lower bound inclusive: a loss exactly at
/// a cutoff lands in the higher tier.
pub fn classify(policy: &RiskPolicy, loss_pct: f64) -> RiskTier {
    if loss_pct >= policy.tiers.critical {
        RiskTier::Critical
    } else if loss_pct >= policy.tiers.high {
        RiskTier::High
    } else if loss_pct >= policy.tiers.moderate {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    }
}

/// All four explainer contributions in declaration order.
pub fn risk_factors(policy: &RiskPolicy, weather: &WeatherObservation) -> Vec<RiskFactor> {
    let w = &policy.weights;
    vec![
        RiskFactor {
            kind: RiskFactorKind::RainfallDeficit,
            contribution: (100.0 - weather.rainfall_pct).max(0.0) * w.rainfall_deficit,
        },
        RiskFactor {
            kind: RiskFactorKind::HeatStress,
            contribution: weather.heatwave_days * w.heat_stress,
        },
        RiskFactor {
            kind: RiskFactorKind::WaterStress,
            contribution: weather.dry_days * w.water_stress,
        },
        RiskFactor {
            kind: RiskFactorKind::HumidityImbalance,
            contribution: (weather.humidity - w.humidity_pivot).abs() * w.humidity_imbalance,
        },
    ]
}

/// Top contributions ranked descending; ties keep declaration order.
pub fn top_risk_factors(
    policy: &RiskPolicy,
    weather: &WeatherObservation,
    count: usize,
) -> Vec<RiskFactor> {
    let mut factors = risk_factors(policy, weather);
    // Stable sort preserves the declaration order for equal contributions.
    factors.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
    factors.truncate(count);
    factors
}

pub fn weather_status(policy: &RiskPolicy, weather: &WeatherObservation) -> WeatherStatus {
    let s = &policy.status;
    WeatherStatus {
        rainfall: if (s.rainfall_normal.0..=s.rainfall_normal.1).contains(&weather.rainfall_pct) {
            ParameterStatus::Normal
        } else {
            ParameterStatus::Deficit
        },
        heatwave: if weather.heatwave_days > s.heatwave_high {
            ParameterStatus::High
        } else {
            ParameterStatus::Normal
        },
        dry_days: if weather.dry_days > s.dry_days_critical {
            ParameterStatus::Critical
        } else {
            ParameterStatus::Manageable
        },
        humidity: if (s.humidity_optimal.0..=s.humidity_optimal.1).contains(&weather.humidity) {
            ParameterStatus::Optimal
        } else {
            ParameterStatus::Extreme
        },
    }
}

/// Alerts fire independently, in fixed order.
pub fn weather_alerts(policy: &RiskPolicy, weather: &WeatherObservation) -> Vec<WeatherAlert> {
    let a = &policy.alerts;
    let mut alerts = Vec::new();
    if weather.rainfall_pct < a.irrigation_rainfall {
        alerts.push(WeatherAlert::IrrigationCritical);
    }
    if weather.heatwave_days > a.shade_net_heatwave {
        alerts.push(WeatherAlert::ShadeNetsUrgent);
    }
    if weather.dry_days > a.mulching_dry_days {
        alerts.push(WeatherAlert::MulchingRequired);
    }
    alerts
}

/// Assemble the full report for one prediction.
pub fn analyze(
    policy: &RiskPolicy,
    district: Option<&str>,
    crop: &str,
    weather: &WeatherObservation,
    loss_pct: f64,
    quality_score: f64,
) -> RiskReport {
    RiskReport {
        district: district.map(str::to_string),
        crop: crop.to_string(),
        weather: *weather,
        loss_pct,
        tier: classify(policy, loss_pct),
        top_factors: top_risk_factors(policy, weather, 3),
        status: weather_status(policy, weather),
        alerts: weather_alerts(policy, weather),
        varieties: crate::datasources::variety_recommendations(crop),
        irrigation: if loss_pct > policy.daily_irrigation_loss {
            IrrigationSchedule::Daily
        } else {
            IrrigationSchedule::EveryTwoToThreeDays
        },
        quality_score,
        generated_at: Utc::now(),
    }
}

/// Deterministic markdown narrative, suitable for direct display.
pub fn format_report(report: &RiskReport) -> String {
    let heading = match &report.district {
        Some(district) => format!("{} - {}", district, report.crop),
        None => report.crop.clone(),
    };

    let mut text = format!(
        "# {heading} PRODUCTION RISK REPORT\n\n\
         ## Predicted Yield Loss: {:.1}% {} {}\n\n\
         ### Weather Dashboard\n\
         | Parameter | Current | Status |\n\
         |-----------|---------|--------|\n\
         | Rainfall | {:.0}% | {} |\n\
         | Heatwave Days | {:.1} | {} |\n\
         | Consecutive Dry Days | {:.0} | {} |\n\
         | Humidity | {:.0}% | {} |\n\n\
         ### Risk Factor Analysis\n",
        report.loss_pct,
        report.tier.tag(),
        report.tier,
        report.weather.rainfall_pct,
        report.status.rainfall,
        report.weather.heatwave_days,
        report.status.heatwave,
        report.weather.dry_days,
        report.status.dry_days,
        report.weather.humidity,
        report.status.humidity,
    );

    for factor in &report.top_factors {
        text.push_str(&format!(
            "- **{}**: {:.0}%\n",
            factor.kind, factor.contribution
        ));
    }

    text.push_str(&format!(
        "\n### Immediate Action Plan\n\
         1. **Recommended Variety**: {}\n\
         2. **Irrigation Schedule**: {}\n",
        report.primary_variety(),
        report.irrigation,
    ));

    if !report.alerts.is_empty() {
        let alerts: Vec<&str> = report.alerts.iter().map(WeatherAlert::as_str).collect();
        text.push_str(&format!("\n**WEATHER ALERTS**: {}\n", alerts.join(" | ")));
    }

    text.push_str(&format!(
        "\n### Model Performance\n\
         **R² Score**: {:.3} | **Coverage**: 5 Districts x 5 Crops\n\
         **Generated**: {}\n",
        report.quality_score,
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
    ));

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn policy() -> RiskPolicy {
        RiskPolicy::default()
    }

    #[test]
    fn tier_boundaries_are_half_open() {
        let p = policy();
        assert_eq!(classify(&p, 0.0), RiskTier::Low);
        assert_eq!(classify(&p, 11.99), RiskTier::Low);
        assert_eq!(classify(&p, 12.0), RiskTier::Moderate);
        assert_eq!(classify(&p, 27.99), RiskTier::Moderate);
        assert_eq!(classify(&p, 28.0), RiskTier::High);
        assert_eq!(classify(&p, 44.99), RiskTier::High);
        assert_eq!(classify(&p, 45.0), RiskTier::Critical);
        assert_eq!(classify(&p, 100.0), RiskTier::Critical);
    }

    #[test]
    fn factor_contributions_match_weights() {
        let weather = WeatherObservation::new(80.0, 3.0, 5.0, 65.0);
        let factors = risk_factors(&policy(), &weather);
        assert_relative_eq!(factors[0].contribution, 20.0 * 0.38);
        assert_relative_eq!(factors[1].contribution, 3.0 * 4.8);
        assert_relative_eq!(factors[2].contribution, 5.0 * 1.65);
        assert_relative_eq!(factors[3].contribution, 3.0 * 0.28);
    }

    #[test]
    fn top_factors_rank_descending() {
        // Heat dominates here: 10 * 4.8 = 48.
        let weather = WeatherObservation::new(95.0, 10.0, 20.0, 68.0);
        let top = top_risk_factors(&policy(), &weather, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].kind, RiskFactorKind::HeatStress);
        assert_eq!(top[1].kind, RiskFactorKind::WaterStress);
        assert!(top[0].contribution >= top[1].contribution);
        assert!(top[1].contribution >= top[2].contribution);
    }

    #[test]
    fn tied_factors_keep_declaration_order() {
        // Everything zero: four-way tie, declaration order decides.
        let weather = WeatherObservation::new(100.0, 0.0, 0.0, 68.0);
        let top = top_risk_factors(&policy(), &weather, 3);
        assert_eq!(top[0].kind, RiskFactorKind::RainfallDeficit);
        assert_eq!(top[1].kind, RiskFactorKind::HeatStress);
        assert_eq!(top[2].kind, RiskFactorKind::WaterStress);
    }

    #[test]
    fn status_flags_follow_thresholds() {
        let p = policy();
        let status = weather_status(&p, &WeatherObservation::new(92.0, 6.2, 13.0, 70.0));
        assert_eq!(status.rainfall, ParameterStatus::Normal);
        assert_eq!(status.heatwave, ParameterStatus::High);
        assert_eq!(status.dry_days, ParameterStatus::Manageable);
        assert_eq!(status.humidity, ParameterStatus::Optimal);

        let status = weather_status(&p, &WeatherObservation::new(74.0, 2.0, 22.0, 45.0));
        assert_eq!(status.rainfall, ParameterStatus::Deficit);
        assert_eq!(status.heatwave, ParameterStatus::Normal);
        assert_eq!(status.dry_days, ParameterStatus::Critical);
        assert_eq!(status.humidity, ParameterStatus::Extreme);
    }

    #[test]
    fn only_irrigation_alert_fires_for_mild_deficit() {
        let weather = WeatherObservation::new(80.0, 3.0, 5.0, 65.0);
        let alerts = weather_alerts(&policy(), &weather);
        assert_eq!(alerts, vec![WeatherAlert::IrrigationCritical]);
    }

    #[test]
    fn all_alerts_fire_in_fixed_order() {
        let weather = WeatherObservation::new(60.0, 9.0, 20.0, 50.0);
        let alerts = weather_alerts(&policy(), &weather);
        assert_eq!(
            alerts,
            vec![
                WeatherAlert::IrrigationCritical,
                WeatherAlert::ShadeNetsUrgent,
                WeatherAlert::MulchingRequired,
            ]
        );
    }

    #[test]
    fn irrigation_schedule_switches_at_policy_loss() {
        let p = policy();
        let weather = WeatherObservation::new(92.0, 6.2, 13.0, 70.0);
        let low = analyze(&p, Some("Pune"), "Rice", &weather, 30.0, 0.9);
        assert_eq!(low.irrigation, IrrigationSchedule::EveryTwoToThreeDays);
        let high = analyze(&p, Some("Pune"), "Rice", &weather, 40.0, 0.9);
        assert_eq!(high.irrigation, IrrigationSchedule::Daily);
    }

    #[test]
    fn narrative_contains_tier_loss_and_variety() {
        let weather = WeatherObservation::new(74.0, 9.2, 22.0, 61.0);
        let report = analyze(&policy(), Some("Aurangabad"), "Rice", &weather, 52.3, 0.87);
        let text = format_report(&report);
        assert!(text.contains("Aurangabad - Rice"));
        assert!(text.contains("52.3%"));
        assert!(text.contains("CRITICAL"));
        assert!(text.contains("Sahbhagi Dhan (drought)"));
        assert!(text.contains("WEATHER ALERTS"));
        assert!(text.contains("IRRIGATION CRITICAL"));
    }

    #[test]
    fn narrative_omits_alert_line_when_quiet() {
        let weather = WeatherObservation::new(100.0, 2.0, 5.0, 68.0);
        let report = analyze(&policy(), Some("Pune"), "Wheat", &weather, 8.0, 0.87);
        let text = format_report(&report);
        assert!(!text.contains("WEATHER ALERTS"));
        assert!(text.contains("LOW"));
    }
}
