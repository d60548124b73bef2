//! Patient record for hypertension risk prediction.
//!
//! Field names and clinical ranges follow the prediction service's feature
//! schema (Framingham-derived, Portuguese field names on the wire).

use serde::{Deserialize, Serialize};

/// Number of features the prediction service expects.
pub const FIELD_COUNT: usize = 12;

/// Declared domain of a single input field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire name, as serialized in the request body.
    pub name: &'static str,
    /// Human-readable label for messages and the form.
    pub label: &'static str,
    /// Entry hint shown in the form.
    pub hint: &'static str,
    pub min: f64,
    pub max: f64,
    /// Whether the field is integer-coded (binary flags and counts).
    pub integer: bool,
}

/// Field table, in form and wire order.
pub const FIELD_SPECS: [FieldSpec; FIELD_COUNT] = [
    FieldSpec { name: "sexo", label: "Sexo", hint: "0=feminino, 1=masculino", min: 0.0, max: 1.0, integer: true },
    FieldSpec { name: "idade", label: "Idade", hint: "anos (18-100)", min: 18.0, max: 100.0, integer: true },
    FieldSpec { name: "fumante_atualmente", label: "Fumante atualmente", hint: "0=não, 1=sim", min: 0.0, max: 1.0, integer: true },
    FieldSpec { name: "cigarros_por_dia", label: "Cigarros por dia", hint: "0-60 (0 se não fumante)", min: 0.0, max: 60.0, integer: true },
    FieldSpec { name: "medicamento_pressao", label: "Medicamento para pressão", hint: "0=não, 1=sim", min: 0.0, max: 1.0, integer: true },
    FieldSpec { name: "diabetes", label: "Diabetes", hint: "0=não, 1=sim", min: 0.0, max: 1.0, integer: true },
    FieldSpec { name: "colesterol_total", label: "Colesterol total", hint: "mg/dL (100-400)", min: 100.0, max: 400.0, integer: false },
    FieldSpec { name: "pressao_sistolica", label: "Pressão sistólica", hint: "mmHg (80-220)", min: 80.0, max: 220.0, integer: false },
    FieldSpec { name: "pressao_diastolica", label: "Pressão diastólica", hint: "mmHg (50-150)", min: 50.0, max: 150.0, integer: false },
    FieldSpec { name: "imc", label: "IMC", hint: "kg/m² (15-50)", min: 15.0, max: 50.0, integer: false },
    FieldSpec { name: "frequencia_cardiaca", label: "Frequência cardíaca", hint: "bpm (40-150)", min: 40.0, max: 150.0, integer: false },
    FieldSpec { name: "glicose", label: "Glicose", hint: "mg/dL (50-300)", min: 50.0, max: 300.0, integer: false },
];

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Wire name of the offending field.
    pub field: &'static str,
    /// Message, already carrying the field label.
    pub message: String,
}

impl FieldError {
    fn required(spec: &FieldSpec) -> Self {
        Self {
            field: spec.name,
            message: format!("{}: campo obrigatório", spec.label),
        }
    }

    fn not_a_number(spec: &FieldSpec) -> Self {
        Self {
            field: spec.name,
            message: format!("{}: valor numérico inválido", spec.label),
        }
    }

    fn below_minimum(spec: &FieldSpec) -> Self {
        Self {
            field: spec.name,
            message: format!("{} abaixo do mínimo ({})", spec.label, spec.min),
        }
    }

    fn above_maximum(spec: &FieldSpec) -> Self {
        Self {
            field: spec.name,
            message: format!("{} acima do máximo ({})", spec.label, spec.max),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// All field errors of one rejected submission, reported together.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Patient record sent to the prediction service.
///
/// Built fresh from the form on every submission; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    pub sexo: u8,
    pub idade: u32,
    pub fumante_atualmente: u8,
    pub cigarros_por_dia: u32,
    pub medicamento_pressao: u8,
    pub diabetes: u8,
    pub colesterol_total: f64,
    pub pressao_sistolica: f64,
    pub pressao_diastolica: f64,
    pub imc: f64,
    pub frequencia_cardiaca: f64,
    pub glicose: f64,
}

impl PatientInput {
    /// Parse raw field values (form order, see [`FIELD_SPECS`]) into a
    /// normalized record.
    ///
    /// All offending fields are reported together; there is no partial
    /// success and no fail-fast on the first error.
    ///
    /// # Errors
    /// Returns every field-level error found.
    pub fn parse(raw: &[String; FIELD_COUNT]) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut values = [0.0_f64; FIELD_COUNT];

        for (i, spec) in FIELD_SPECS.iter().enumerate() {
            let text = raw[i].trim();
            if text.is_empty() {
                errors.push(FieldError::required(spec));
                continue;
            }
            let value: f64 = match text.parse() {
                Ok(v) => v,
                Err(_) => {
                    errors.push(FieldError::not_a_number(spec));
                    continue;
                }
            };
            if spec.integer && value.fract() != 0.0 {
                errors.push(FieldError::not_a_number(spec));
                continue;
            }
            if value < spec.min {
                errors.push(FieldError::below_minimum(spec));
            } else if value > spec.max {
                errors.push(FieldError::above_maximum(spec));
            } else {
                values[i] = value;
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            sexo: values[0] as u8,
            idade: values[1] as u32,
            fumante_atualmente: values[2] as u8,
            cigarros_por_dia: values[3] as u32,
            medicamento_pressao: values[4] as u8,
            diabetes: values[5] as u8,
            colesterol_total: values[6],
            pressao_sistolica: values[7],
            pressao_diastolica: values[8],
            imc: values[9],
            frequencia_cardiaca: values[10],
            glicose: values[11],
        }
        .normalized())
    }

    /// Validate an already-typed record against the declared ranges.
    ///
    /// Validating a normalized valid record yields zero errors.
    ///
    /// # Errors
    /// Returns every field-level error found.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        for (spec, value) in FIELD_SPECS.iter().zip(self.values()) {
            if value < spec.min {
                errors.push(FieldError::below_minimum(spec));
            } else if value > spec.max {
                errors.push(FieldError::above_maximum(spec));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Enforce the smoker invariant: cigarettes per day is 0 whenever the
    /// patient is not a current smoker.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.fumante_atualmente == 0 {
            self.cigarros_por_dia = 0;
        }
        self
    }

    /// Field values in wire order.
    fn values(&self) -> [f64; FIELD_COUNT] {
        [
            f64::from(self.sexo),
            f64::from(self.idade),
            f64::from(self.fumante_atualmente),
            f64::from(self.cigarros_por_dia),
            f64::from(self.medicamento_pressao),
            f64::from(self.diabetes),
            self.colesterol_total,
            self.pressao_sistolica,
            self.pressao_diastolica,
            self.imc,
            self.frequencia_cardiaca,
            self.glicose,
        ]
    }

    /// Typical low-risk patient, for the form's demo fill.
    #[must_use]
    pub fn sample_low() -> Self {
        Self {
            sexo: 0,
            idade: 35,
            fumante_atualmente: 0,
            cigarros_por_dia: 0,
            medicamento_pressao: 0,
            diabetes: 0,
            colesterol_total: 180.0,
            pressao_sistolica: 115.0,
            pressao_diastolica: 75.0,
            imc: 23.0,
            frequencia_cardiaca: 68.0,
            glicose: 85.0,
        }
    }

    /// Typical moderate-risk patient.
    #[must_use]
    pub fn sample_medium() -> Self {
        Self {
            sexo: 1,
            idade: 50,
            fumante_atualmente: 0,
            cigarros_por_dia: 0,
            medicamento_pressao: 0,
            diabetes: 0,
            colesterol_total: 220.0,
            pressao_sistolica: 135.0,
            pressao_diastolica: 88.0,
            imc: 27.0,
            frequencia_cardiaca: 75.0,
            glicose: 100.0,
        }
    }

    /// Typical high-risk patient: elderly smoker with diabetes and
    /// medicated hypertension.
    #[must_use]
    pub fn sample_high() -> Self {
        Self {
            sexo: 1,
            idade: 65,
            fumante_atualmente: 1,
            cigarros_por_dia: 20,
            medicamento_pressao: 1,
            diabetes: 1,
            colesterol_total: 280.0,
            pressao_sistolica: 160.0,
            pressao_diastolica: 100.0,
            imc: 32.0,
            frequencia_cardiaca: 90.0,
            glicose: 140.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(values: [&str; FIELD_COUNT]) -> [String; FIELD_COUNT] {
        values.map(str::to_string)
    }

    #[test]
    fn test_parse_valid_record() {
        let input = PatientInput::parse(&raw([
            "1", "55", "1", "10", "1", "0", "250", "150", "95", "28.5", "82", "110",
        ]))
        .expect("Should parse");

        assert_eq!(input.idade, 55);
        assert_eq!(input.cigarros_por_dia, 10);
        assert!((input.imc - 28.5).abs() < f64::EPSILON);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_age_names_field_and_bound() {
        let err = PatientInput::parse(&raw([
            "0", "150", "0", "0", "0", "0", "180", "115", "75", "23", "68", "85",
        ]))
        .expect_err("Age 150 must be rejected");

        assert_eq!(err.len(), 1);
        assert_eq!(err[0].field, "idade");
        assert!(err[0].message.contains("Idade"));
        assert!(err[0].message.contains("100"));
        assert!(err[0].message.contains("acima do máximo"));
    }

    #[test]
    fn test_errors_are_collected_not_fail_fast() {
        let err = PatientInput::parse(&raw([
            "0", "10", "0", "0", "0", "0", "", "500", "75", "23", "68", "85",
        ]))
        .expect_err("Three violations expected");

        let fields: Vec<_> = err.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["idade", "colesterol_total", "pressao_sistolica"]);
        assert!(err[0].message.contains("abaixo do mínimo"));
        assert!(err[1].message.contains("campo obrigatório"));
        assert!(err[2].message.contains("acima do máximo"));
    }

    #[test]
    fn test_non_smoker_cigarettes_forced_to_zero() {
        let input = PatientInput::parse(&raw([
            "1", "50", "0", "20", "0", "0", "220", "135", "88", "27", "75", "100",
        ]))
        .expect("Should parse");

        assert_eq!(input.fumante_atualmente, 0);
        assert_eq!(input.cigarros_por_dia, 0);
    }

    #[test]
    fn test_validation_is_idempotent_on_samples() {
        for sample in [
            PatientInput::sample_low(),
            PatientInput::sample_medium(),
            PatientInput::sample_high(),
        ] {
            let normalized = sample.normalized();
            assert!(normalized.validate().is_ok());
            assert_eq!(normalized.clone().normalized(), normalized);
        }
    }

    #[test]
    fn test_binary_field_rejects_out_of_domain() {
        let err = PatientInput::parse(&raw([
            "2", "50", "0", "0", "0", "0", "220", "135", "88", "27", "75", "100",
        ]))
        .expect_err("sexo=2 must be rejected");

        assert_eq!(err[0].field, "sexo");
    }

    #[test]
    fn test_wire_serialization_uses_schema_names() {
        let json = serde_json::to_value(PatientInput::sample_low()).expect("Should serialize");
        assert_eq!(json["idade"], 35);
        assert_eq!(json["pressao_sistolica"], 115.0);
        assert_eq!(json["fumante_atualmente"], 0);
        assert_eq!(json.as_object().map(|o| o.len()), Some(FIELD_COUNT));
    }
}
