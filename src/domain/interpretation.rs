//! Natural-language clinical interpretation of a prediction.
//!
//! Pure functions: output is fully determined by probability, binary
//! prediction and the patient record.

use super::PatientInput;

/// Clinical thresholds for the risk-factor scan. All inclusive.
const AGE_ELDERLY: u32 = 60;
const SYSTOLIC_ELEVATED: f64 = 140.0;
const DIASTOLIC_ELEVATED: f64 = 90.0;
const BMI_OBESE: f64 = 30.0;
const CHOLESTEROL_ELEVATED: f64 = 240.0;
const GLUCOSE_ELEVATED: f64 = 126.0;

/// Scan the record for elevated risk factors, in fixed evaluation order.
#[must_use]
pub fn risk_factors(input: &PatientInput) -> Vec<&'static str> {
    let mut factors = Vec::new();

    if input.idade >= AGE_ELDERLY {
        factors.push("idade avançada");
    }
    if input.fumante_atualmente == 1 {
        factors.push("tabagismo");
    }
    if input.diabetes == 1 {
        factors.push("diabetes");
    }
    if input.medicamento_pressao == 1 {
        factors.push("uso de medicamento para pressão");
    }
    if input.pressao_sistolica >= SYSTOLIC_ELEVATED {
        factors.push("pressão sistólica elevada");
    }
    if input.pressao_diastolica >= DIASTOLIC_ELEVATED {
        factors.push("pressão diastólica elevada");
    }
    if input.imc >= BMI_OBESE {
        factors.push("obesidade");
    }
    if input.colesterol_total >= CHOLESTEROL_ELEVATED {
        factors.push("colesterol elevado");
    }
    if input.glicose >= GLUCOSE_ELEVATED {
        factors.push("glicose elevada");
    }

    factors
}

/// Build the interpretation paragraph: probability sentence, identified risk
/// factors (or the fixed no-factors sentence), and a closing recommendation
/// conditioned on the binary prediction.
#[must_use]
pub fn interpret(probability: f64, prediction: u8, input: &PatientInput) -> String {
    let mut text = format!(
        "Com base nos dados fornecidos, o modelo estima uma probabilidade de {:.1}% para hipertensão. ",
        probability * 100.0
    );

    let factors = risk_factors(input);
    if factors.is_empty() {
        text.push_str("Nenhum fator de risco significativo identificado nos dados fornecidos. ");
    } else {
        text.push_str(&format!(
            "Fatores de risco identificados: {}. ",
            factors.join(", ")
        ));
    }

    if prediction == 1 {
        text.push_str("Recomenda-se avaliação médica para confirmação diagnóstica.");
    } else {
        text.push_str("Manter acompanhamento de rotina e hábitos de vida saudáveis.");
    }

    text
}
