//! Risk categorization and the prediction service's response type.

use serde::{Deserialize, Serialize};

/// Risk category derived from the predicted probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    /// Low probability of hypertension
    Low,
    /// Moderate probability, closer follow-up recommended
    Medium,
    /// High probability, clinical evaluation recommended
    High,
}

impl RiskCategory {
    /// Classify a probability into a category.
    ///
    /// Band boundaries are inclusive on the lower side: 0.3 is Medium and
    /// 0.7 is High.
    #[must_use]
    pub fn classify(probability: f64) -> Self {
        if probability < 0.3 {
            Self::Low
        } else if probability < 0.7 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Parse a server-provided category string, leniently.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Badge label shown next to the probability.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Risco Baixo",
            Self::Medium => "Risco Moderado",
            Self::High => "Risco Elevado",
        }
    }

    /// Clinical recommendation text for the category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => {
                "O paciente apresenta baixa probabilidade de desenvolver hipertensão. \
                 Recomenda-se manter hábitos saudáveis e realizar acompanhamento de rotina."
            }
            Self::Medium => {
                "O paciente apresenta risco moderado. Recomenda-se atenção aos fatores \
                 de risco modificáveis e acompanhamento médico mais frequente."
            }
            Self::High => {
                "O paciente apresenta alta probabilidade de hipertensão. Recomenda-se \
                 avaliação médica imediata e intervenção nos fatores de risco."
            }
        }
    }

    /// Fixed display color, as a CSS hex string.
    #[must_use]
    pub fn hex_color(&self) -> &'static str {
        match self {
            Self::Low => "#10b981",
            Self::Medium => "#f59e0b",
            Self::High => "#ef4444",
        }
    }

    /// Fixed display color as RGB, for terminal rendering.
    #[must_use]
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129),    // Emerald (#10B981)
            Self::Medium => (245, 158, 11), // Amber (#F59E0B)
            Self::High => (239, 68, 68),    // Red (#EF4444)
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "BAIXO"),
            Self::Medium => write!(f, "MODERADO"),
            Self::High => write!(f, "ELEVADO"),
        }
    }
}

/// Response of the prediction endpoint.
///
/// The service does not guarantee every field; absent numerics default to 0
/// and absent strings render as "N/A" downstream. Unknown extra fields
/// (`missing_features`, `model_version`, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionResult {
    /// Predicted probability in [0, 1].
    #[serde(default)]
    pub probability: f64,

    /// Binary prediction at the selected threshold (0 or 1).
    #[serde(default)]
    pub prediction: u8,

    /// Server-side category, when the deployed model reports one. Takes
    /// precedence for display; [`RiskCategory::classify`] is the fallback.
    #[serde(default)]
    pub risk_category: Option<String>,

    /// Model identifier (older deployments).
    #[serde(default)]
    pub model: Option<String>,

    /// Model identifier (newer deployments).
    #[serde(default)]
    pub model_selected: Option<String>,

    /// Probability cutoff used for the binary prediction.
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Name of the operating point the cutoff came from.
    #[serde(default)]
    pub threshold_profile: Option<String>,
}

impl PredictionResult {
    /// Display category: server value when recognized, local classification
    /// otherwise.
    #[must_use]
    pub fn category(&self) -> RiskCategory {
        self.risk_category
            .as_deref()
            .and_then(RiskCategory::parse)
            .unwrap_or_else(|| RiskCategory::classify(self.probability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_total_with_inclusive_lower_bounds() {
        assert_eq!(RiskCategory::classify(0.0), RiskCategory::Low);
        assert_eq!(RiskCategory::classify(0.29), RiskCategory::Low);
        assert_eq!(RiskCategory::classify(0.3), RiskCategory::Medium);
        assert_eq!(RiskCategory::classify(0.69), RiskCategory::Medium);
        assert_eq!(RiskCategory::classify(0.7), RiskCategory::High);
        assert_eq!(RiskCategory::classify(1.0), RiskCategory::High);
    }

    #[test]
    fn test_category_colors_are_fixed() {
        assert_eq!(RiskCategory::Low.hex_color(), "#10b981");
        assert_eq!(RiskCategory::Medium.hex_color(), "#f59e0b");
        assert_eq!(RiskCategory::High.hex_color(), "#ef4444");
    }

    #[test]
    fn test_server_category_takes_precedence() {
        let result = PredictionResult {
            probability: 0.1,
            risk_category: Some("high".to_string()),
            ..Default::default()
        };
        assert_eq!(result.category(), RiskCategory::High);
    }

    #[test]
    fn test_server_and_local_paths_agree_for_canonical_inputs() {
        for (p, name) in [(0.1, "low"), (0.5, "medium"), (0.9, "high")] {
            let with_server = PredictionResult {
                probability: p,
                risk_category: Some(name.to_string()),
                ..Default::default()
            };
            let without = PredictionResult {
                probability: p,
                ..Default::default()
            };
            assert_eq!(with_server.category(), without.category());
        }
    }

    #[test]
    fn test_unknown_server_category_falls_back_to_classify() {
        let result = PredictionResult {
            probability: 0.8,
            risk_category: Some("critical".to_string()),
            ..Default::default()
        };
        assert_eq!(result.category(), RiskCategory::High);
    }

    #[test]
    fn test_deserialization_tolerates_missing_and_extra_fields() {
        let result: PredictionResult =
            serde_json::from_str(r#"{"probability": 0.42, "missing_features": []}"#)
                .expect("Should deserialize");
        assert!((result.probability - 0.42).abs() < f64::EPSILON);
        assert_eq!(result.prediction, 0);
        assert!(result.model.is_none());
        assert!(result.threshold.is_none());
    }

    #[test]
    fn test_full_response_deserializes() {
        let body = r#"{
            "probability": 0.73,
            "threshold": 0.5,
            "prediction": 1,
            "threshold_profile": "balanced",
            "risk_category": "high",
            "model": "GradientBoostingClassifier",
            "model_version": "gb_v1"
        }"#;
        let result: PredictionResult = serde_json::from_str(body).expect("Should deserialize");
        assert_eq!(result.prediction, 1);
        assert_eq!(result.category(), RiskCategory::High);
        assert_eq!(result.threshold_profile.as_deref(), Some("balanced"));
    }
}
