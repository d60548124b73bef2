//! Dashboard view: service status and session summary.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::RiskCategory;
use crate::ports::HealthReport;
use crate::tui::styles::Theme;

/// Last known state of the prediction service.
#[derive(Debug, Clone, Default)]
pub enum ServiceStatus {
    /// No probe run yet
    #[default]
    Unknown,
    /// Probe in flight
    Checking,
    /// Probe finished
    Reported(HealthReport),
}

/// Per-session assessment counters. Reset when the app exits; nothing is
/// persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionSummary {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl SessionSummary {
    /// Count one completed assessment.
    pub fn record(&mut self, category: RiskCategory) {
        match category {
            RiskCategory::Low => self.low += 1,
            RiskCategory::Medium => self.medium += 1,
            RiskCategory::High => self.high += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

/// Dashboard state owned by the app.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub service: ServiceStatus,
    pub summary: SessionSummary,
    /// API base URL, shown so the operator knows which deployment this is.
    pub api_base: String,
}

/// Render the dashboard screen
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Service status
            Constraint::Length(7), // Session summary
            Constraint::Min(0),    // Quick actions
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_service_status(f, chunks[1], state);
    render_summary(f, chunks[2], &state.summary);
    render_actions(f, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Pressura", Theme::title()),
        Span::styled(
            " │ Avaliação de Risco de Hipertensão",
            Theme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_service_status(f: &mut Frame, area: Rect, state: &DashboardState) {
    let (status_span, detail) = match &state.service {
        ServiceStatus::Unknown => (
            Span::styled("● Desconhecido", Theme::text_muted()),
            "Pressione [H] para verificar".to_string(),
        ),
        ServiceStatus::Checking => (
            Span::styled("● Verificando...", Theme::info()),
            "Consultando /health".to_string(),
        ),
        ServiceStatus::Reported(report) if report.is_healthy() => (
            Span::styled("● Operacional", Theme::success()),
            "Serviço de predição respondendo".to_string(),
        ),
        ServiceStatus::Reported(report) => (
            Span::styled("● Indisponível", Theme::danger()),
            report
                .message
                .clone()
                .unwrap_or_else(|| "Sem detalhes".to_string()),
        ),
    };

    let content = Paragraph::new(vec![
        Line::from(status_span),
        Line::from(Span::styled(detail, Theme::text_secondary())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Endpoint: ", Theme::text_muted()),
            Span::styled(state.api_base.clone(), Theme::text_muted()),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Serviço de Predição ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    f.render_widget(content, area);
}

fn render_summary(f: &mut Frame, area: Rect, summary: &SessionSummary) {
    let content = if summary.total() == 0 {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "Nenhuma avaliação nesta sessão",
                Theme::text_muted(),
            )),
        ]
    } else {
        vec![
            Line::from(vec![
                Span::styled("Total: ", Theme::text_secondary()),
                Span::styled(summary.total().to_string(), Theme::text()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("● ", Theme::success()),
                Span::styled(format!("Baixo: {}   ", summary.low), Theme::text()),
                Span::styled("● ", Theme::warning()),
                Span::styled(format!("Moderado: {}   ", summary.medium), Theme::text()),
                Span::styled("● ", Theme::danger()),
                Span::styled(format!("Elevado: {}", summary.high), Theme::text()),
            ]),
        ]
    };

    let panel = Paragraph::new(content).block(
        Block::default()
            .title(Span::styled(" Sessão Atual ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    f.render_widget(panel, area);
}

fn render_actions(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("[N] ", Theme::key_hint()),
            Span::styled("Nova Avaliação    ", Theme::key_desc()),
            Span::styled("[H] ", Theme::key_hint()),
            Span::styled("Verificar API    ", Theme::key_desc()),
            Span::styled("[Q] ", Theme::key_hint()),
            Span::styled("Sair", Theme::key_desc()),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    f.render_widget(content, area);
}
