//! Patient data input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{FieldError, PatientInput, FIELD_SPECS};
use crate::tui::styles::Theme;

/// One editable form field, bound to a `FIELD_SPECS` entry.
#[derive(Debug, Clone, Default)]
pub struct FormField {
    pub value: String,
    /// Validation flag from the last rejected submission.
    pub error: Option<String>,
}

/// Patient form state.
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    /// Banner summarizing the last rejection.
    pub error_message: Option<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        Self {
            fields: vec![FormField::default(); FIELD_SPECS.len()],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl PatientFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' {
            self.fields[self.selected_field].value.push(c);
            self.fields[self.selected_field].error = None;
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.clear();
    }

    /// Wipe all field buffers from memory and clear values.
    ///
    /// Called immediately after a submission is handed to the worker so
    /// plaintext vitals do not persist in UI state.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
            field.error = None;
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Drop all validation flags. Runs before every re-validation so stale
    /// flags never survive a corrected submission.
    pub fn clear_flags(&mut self) {
        for field in self.fields.iter_mut() {
            field.error = None;
        }
        self.error_message = None;
    }

    /// Validate and convert the buffers into a normalized record.
    ///
    /// On rejection every offending field is flagged and the first message
    /// becomes the banner; no partial success.
    pub fn submit(&mut self) -> Option<PatientInput> {
        self.clear_flags();

        let mut raw: [String; FIELD_SPECS.len()] = Default::default();
        for (slot, field) in raw.iter_mut().zip(&self.fields) {
            slot.clone_from(&field.value);
        }

        match PatientInput::parse(&raw) {
            Ok(input) => Some(input),
            Err(errors) => {
                self.flag(&errors);
                None
            }
        }
    }

    fn flag(&mut self, errors: &[FieldError]) {
        for error in errors {
            if let Some(i) = FIELD_SPECS.iter().position(|s| s.name == error.field) {
                self.fields[i].error = Some(error.message.clone());
            }
        }
        self.error_message = Some(format!(
            "{} ({} campo(s) inválido(s))",
            errors[0].message,
            errors.len()
        ));
    }

    /// Load a sample patient into the buffers.
    pub fn load_sample(&mut self, sample: &PatientInput) {
        let values = [
            sample.sexo.to_string(),
            sample.idade.to_string(),
            sample.fumante_atualmente.to_string(),
            sample.cigarros_por_dia.to_string(),
            sample.medicamento_pressao.to_string(),
            sample.diabetes.to_string(),
            sample.colesterol_total.to_string(),
            sample.pressao_sistolica.to_string(),
            sample.pressao_diastolica.to_string(),
            sample.imc.to_string(),
            sample.frequencia_cardiaca.to_string(),
            sample.glicose.to_string(),
        ];
        for (field, value) in self.fields.iter_mut().zip(values) {
            field.value = value;
            field.error = None;
        }
        self.error_message = None;
    }

    /// Reset the form to the original defaults.
    pub fn reset(&mut self) {
        let defaults = [
            "0", "50", "0", "0", "0", "0", "200", "120", "80", "25", "72", "90",
        ];
        for (field, value) in self.fields.iter_mut().zip(defaults) {
            field.value = value.to_string();
            field.error = None;
        }
        self.error_message = None;
        self.selected_field = 0;
    }
}

/// Render the patient data input form
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Dados do Paciente", Theme::title()),
        Span::styled(" │ Avaliação de Risco de Hipertensão", Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    // Two-column layout, six fields per side
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], state, 0, mid);
    render_field_column(f, columns[1], state, mid, state.fields.len());
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    state: &PatientFormState,
    start: usize,
    end: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = (start..end)
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (chunk, i) in chunks.iter().zip(start..end) {
        let field = &state.fields[i];
        let spec = &FIELD_SPECS[i];
        let is_selected = i == state.selected_field;
        let is_invalid = field.error.is_some();

        // Invalid beats focused: a flagged field stays red until corrected.
        let border_style = if is_invalid {
            Theme::danger()
        } else if is_selected {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let title_style = if is_invalid {
            Theme::danger()
        } else if is_selected {
            Theme::focused()
        } else {
            Theme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", spec.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = if field.value.is_empty() {
            Span::styled(spec.hint, Theme::text_muted())
        } else {
            Span::styled(field.value.as_str(), Theme::text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected {
                Span::styled("▌", Theme::focused())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, *chunk);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.clone(), Theme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Navegar ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Enviar ", Theme::key_desc()),
            Span::styled("[D] ", Theme::key_hint()),
            Span::styled("Exemplo ", Theme::key_desc()),
            Span::styled("[R] ", Theme::key_hint()),
            Span::styled("Limpar ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Voltar", Theme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_valid_form() {
        let mut state = PatientFormState::default();
        state.load_sample(&PatientInput::sample_medium());

        let input = state.submit().expect("Should submit");
        assert_eq!(input, PatientInput::sample_medium());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_submit_flags_offending_fields() {
        let mut state = PatientFormState::default();
        state.load_sample(&PatientInput::sample_low());
        state.fields[1].value = "150".to_string(); // idade
        state.fields[7].value.clear(); // pressao_sistolica

        assert!(state.submit().is_none());
        assert!(state.fields[1].error.is_some());
        assert!(state.fields[7].error.is_some());
        assert!(state.fields[2].error.is_none());
        assert!(state
            .error_message
            .as_deref()
            .expect("Should have banner")
            .contains("2 campo(s)"));
    }

    #[test]
    fn test_flags_cleared_on_revalidation() {
        let mut state = PatientFormState::default();
        state.load_sample(&PatientInput::sample_low());
        state.fields[1].value = "150".to_string();
        assert!(state.submit().is_none());

        state.fields[1].value = "45".to_string();
        assert!(state.submit().is_some());
        assert!(state.fields.iter().all(|f| f.error.is_none()));
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_clear_sensitive_wipes_buffers() {
        let mut state = PatientFormState::default();
        state.load_sample(&PatientInput::sample_high());
        state.clear_sensitive();

        assert!(state.fields.iter().all(|f| f.value.is_empty()));
        assert_eq!(state.selected_field, 0);
    }

    #[test]
    fn test_reset_defaults_are_submittable() {
        let mut state = PatientFormState::default();
        state.reset();
        let input = state.submit().expect("Defaults should be valid");
        assert_eq!(input.idade, 50);
        assert_eq!(input.pressao_sistolica, 120.0);
    }

    #[test]
    fn test_input_char_rejects_non_numeric() {
        let mut state = PatientFormState::default();
        state.input_char('x');
        state.input_char('-');
        state.input_char('4');
        state.input_char('2');
        assert_eq!(state.fields[0].value, "42");
    }
}
