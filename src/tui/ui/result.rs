//! Assessment result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::application::Assessment;
use crate::tui::styles::Theme;

/// Result screen state.
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Not started
    #[default]
    Idle,
    /// Request in flight
    Waiting,
    /// Completed with a presentation
    Complete { assessment: Box<Assessment> },
    /// The request expired (kept distinct from other failures)
    TimedOut { message: String },
    /// Error occurred
    Error { message: String },
}

/// Render the assessment result screen
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_content(f, chunks[1], state);
    render_footer(f, chunks[2], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Resultado", Theme::title()),
        Span::styled(" │ Predição de Risco", Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_content(f: &mut Frame, area: Rect, state: &ResultState) {
    match state {
        ResultState::Idle => render_idle(f, area),
        ResultState::Waiting => render_waiting(f, area),
        ResultState::Complete { assessment } => render_complete(f, area, assessment),
        ResultState::TimedOut { message } => {
            render_error_panel(f, area, "! Tempo esgotado", message);
        }
        ResultState::Error { message } => render_error_panel(f, area, "! Erro", message),
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Nenhuma avaliação realizada",
            Theme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Preencha os dados do paciente para começar",
            Theme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    f.render_widget(content, area);
}

fn render_waiting(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Calculando...", Theme::focused())),
        Line::from(""),
        Line::from(Span::styled(
            "Consultando o serviço de predição",
            Theme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    f.render_widget(content, area);
}

fn render_complete(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let p = &assessment.presentation;

    let block = Block::default()
        .title(Span::styled(" Avaliação de Risco ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Badge
            Constraint::Length(4), // Probability gauge
            Constraint::Length(5), // Technical details
            Constraint::Min(3),    // Interpretation
        ])
        .margin(1)
        .split(inner);

    let risk_style = Theme::risk(p.category);

    // Category badge
    let badge = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} ({})", p.label, p.category),
            risk_style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(Span::styled(p.description, Theme::text_secondary())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(badge, chunks[0]);

    // Probability gauge
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(
                    " Probabilidade de Hipertensão ",
                    Theme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .gauge_style(risk_style)
        .percent((p.probability * 100.0).clamp(0.0, 100.0) as u16)
        .label(p.probability_display.clone());
    f.render_widget(gauge, chunks[1]);

    // Technical details
    let details = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Modelo: ", Theme::text_secondary()),
            Span::styled(p.model.clone(), Theme::text()),
            Span::styled("   Predição: ", Theme::text_secondary()),
            Span::styled(p.prediction_label, Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Limiar: ", Theme::text_secondary()),
            Span::styled(p.threshold.clone(), Theme::text()),
            Span::styled("   Perfil: ", Theme::text_secondary()),
            Span::styled(p.threshold_profile.clone(), Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Avaliado em: ", Theme::text_secondary()),
            Span::styled(
                assessment
                    .created_at
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string(),
                Theme::text_muted(),
            ),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Detalhes Técnicos ", Theme::text_secondary()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    f.render_widget(details, chunks[2]);

    // Interpretation
    let interpretation = Paragraph::new(Line::from(Span::styled(
        p.interpretation.clone(),
        Theme::text(),
    )))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(
                " Interpretação Clínica ",
                Theme::text_secondary(),
            ))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    f.render_widget(interpretation, chunks[3]);
}

fn render_error_panel(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(title.to_string(), Theme::danger())),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Theme::text())),
        Line::from(""),
        Line::from(Span::styled(
            "Os dados informados foram mantidos; tente novamente.",
            Theme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::danger()),
    );

    f.render_widget(content, area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Complete { .. } => Line::from(vec![
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Voltar ", Theme::key_desc()),
            Span::styled("[N] ", Theme::key_hint()),
            Span::styled("Nova Avaliação", Theme::key_desc()),
        ]),
        ResultState::TimedOut { .. } | ResultState::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Tentar Novamente ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Cancelar", Theme::key_desc()),
        ]),
        _ => Line::from(vec![Span::styled("Processando...", Theme::text_muted())]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}
