//! Result presenter: maps a prediction response to a display-ready structure.
//!
//! Pure construction from explicit state; the TUI only reads fields from
//! here and performs no mapping of its own. Missing display fields render
//! as a literal "N/A" rather than being omitted.

use crate::domain::{interpret, PatientInput, PredictionResult, RiskCategory};

/// Placeholder for absent display fields.
const PLACEHOLDER: &str = "N/A";

/// Display-ready view of one prediction.
#[derive(Debug, Clone)]
pub struct ResultPresentation {
    /// Raw probability, for the gauge.
    pub probability: f64,
    /// Probability formatted to one decimal place, e.g. "55.0%".
    pub probability_display: String,
    /// Category after server-precedence resolution.
    pub category: RiskCategory,
    /// Fixed category color (CSS hex).
    pub color: &'static str,
    /// Badge label, e.g. "Risco Moderado".
    pub label: &'static str,
    /// Category recommendation text.
    pub description: &'static str,
    /// Model identifier, or "N/A".
    pub model: String,
    /// Threshold formatted to two decimals, or "N/A".
    pub threshold: String,
    /// Threshold profile name, or "N/A".
    pub threshold_profile: String,
    /// Binary prediction label: "Positivo (1)" / "Negativo (0)".
    pub prediction_label: &'static str,
    /// Clinical interpretation paragraph.
    pub interpretation: String,
}

impl ResultPresentation {
    /// Build the presentation for a response and the record that produced it.
    #[must_use]
    pub fn new(result: &PredictionResult, input: &PatientInput) -> Self {
        let category = result.category();

        let model = result
            .model_selected
            .clone()
            .or_else(|| result.model.clone())
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let threshold = result
            .threshold
            .map(|t| format!("{t:.2}"))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let threshold_profile = result
            .threshold_profile
            .clone()
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let prediction_label = if result.prediction == 1 {
            "Positivo (1)"
        } else {
            "Negativo (0)"
        };

        Self {
            probability: result.probability,
            probability_display: format!("{:.1}%", result.probability * 100.0),
            category,
            color: category.hex_color(),
            label: category.label(),
            description: category.description(),
            model,
            threshold,
            threshold_profile,
            prediction_label,
            interpretation: interpret(result.probability, result.prediction, input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_response_presentation() {
        let result = PredictionResult {
            probability: 0.73,
            prediction: 1,
            risk_category: Some("high".to_string()),
            model: Some("GradientBoostingClassifier".to_string()),
            model_selected: Some("gb_v1".to_string()),
            threshold: Some(0.5),
            threshold_profile: Some("balanced".to_string()),
        };
        let p = ResultPresentation::new(&result, &PatientInput::sample_high());

        assert_eq!(p.probability_display, "73.0%");
        assert_eq!(p.category, RiskCategory::High);
        assert_eq!(p.color, "#ef4444");
        assert_eq!(p.label, "Risco Elevado");
        // model_selected wins over model
        assert_eq!(p.model, "gb_v1");
        assert_eq!(p.threshold, "0.50");
        assert_eq!(p.threshold_profile, "balanced");
        assert_eq!(p.prediction_label, "Positivo (1)");
        assert!(p.interpretation.contains("73.0%"));
    }

    #[test]
    fn test_missing_fields_render_as_placeholder() {
        let result = PredictionResult {
            probability: 0.12,
            ..Default::default()
        };
        let p = ResultPresentation::new(&result, &PatientInput::sample_low());

        assert_eq!(p.model, "N/A");
        assert_eq!(p.threshold, "N/A");
        assert_eq!(p.threshold_profile, "N/A");
        assert_eq!(p.prediction_label, "Negativo (0)");
        assert_eq!(p.category, RiskCategory::Low);
        assert_eq!(p.color, "#10b981");
    }

    #[test]
    fn test_server_category_precedence_in_presentation() {
        let result = PredictionResult {
            probability: 0.2,
            risk_category: Some("medium".to_string()),
            ..Default::default()
        };
        let p = ResultPresentation::new(&result, &PatientInput::sample_medium());
        assert_eq!(p.category, RiskCategory::Medium);
        assert_eq!(p.label, "Risco Moderado");
    }
}
