use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Moderate => "MODERATE",
            RiskTier::High => "HIGH",
            RiskTier::Critical => "CRITICAL",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            RiskTier::Low => "🟢",
            RiskTier::Moderate => "🟡",
            RiskTier::High => "🔴",
            RiskTier::Critical => "⚫",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four fixed explainer terms, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFactorKind {
    RainfallDeficit,
    HeatStress,
    WaterStress,
    HumidityImbalance,
}

impl RiskFactorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFactorKind::RainfallDeficit => "Rainfall Deficit",
            RiskFactorKind::HeatStress => "Heat Stress",
            RiskFactorKind::WaterStress => "Water Stress",
            RiskFactorKind::HumidityImbalance => "Humidity Imbalance",
        }
    }
}

impl std::fmt::Display for RiskFactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One explainer term with its heuristic contribution in loss points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskFactor {
    pub kind: RiskFactorKind,
    pub contribution: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterStatus {
    Normal,
    Deficit,
    High,
    Critical,
    Manageable,
    Optimal,
    Extreme,
}

impl ParameterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterStatus::Normal => "Normal",
            ParameterStatus::Deficit => "Deficit",
            ParameterStatus::High => "High",
            ParameterStatus::Critical => "Critical",
            ParameterStatus::Manageable => "Manageable",
            ParameterStatus::Optimal => "Optimal",
            ParameterStatus::Extreme => "Extreme",
        }
    }
}

impl std::fmt::Display for ParameterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-parameter status flags shown in the report dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeatherStatus {
    pub rainfall: ParameterStatus,
    pub heatwave: ParameterStatus,
    pub dry_days: ParameterStatus,
    pub humidity: ParameterStatus,
}

/// Alerts fire independently; the declaration order here is the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherAlert {
    IrrigationCritical,
    ShadeNetsUrgent,
    MulchingRequired,
}

impl WeatherAlert {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherAlert::IrrigationCritical => "IRRIGATION CRITICAL",
            WeatherAlert::ShadeNetsUrgent => "SHADE NETS URGENT",
            WeatherAlert::MulchingRequired => "MULCHING REQUIRED",
        }
    }
}

impl std::fmt::Display for WeatherAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrigationSchedule {
    Daily,
    EveryTwoToThreeDays,
}

impl IrrigationSchedule {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationSchedule::Daily => "DAILY (Critical)",
            IrrigationSchedule::EveryTwoToThreeDays => "Every 2-3 days",
        }
    }
}

impl std::fmt::Display for IrrigationSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full risk assessment for one district/crop request.
///
/// Derived and stateless: recomputed per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub district: Option<String>,
    pub crop: String,
    pub weather: super::WeatherObservation,
    /// Predicted yield loss percent, clamped to [0, 100].
    pub loss_pct: f64,
    pub tier: RiskTier,
    /// Top explainer contributions, ranked descending.
    pub top_factors: Vec<RiskFactor>,
    pub status: WeatherStatus,
    pub alerts: Vec<WeatherAlert>,
    /// Variety recommendations for the crop; first entry is primary.
    pub varieties: Vec<String>,
    pub irrigation: IrrigationSchedule,
    /// Composite weighted R² of the fitted model.
    pub quality_score: f64,
    pub generated_at: DateTime<Utc>,
}

impl RiskReport {
    pub fn primary_variety(&self) -> &str {
        self.varieties
            .first()
            .map(String::as_str)
            .unwrap_or("Consult agri officer")
    }
}
