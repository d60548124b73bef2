//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration
//! - Background prediction requests via worker threads

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::HttpPredictionApi;
use crate::application::AssessmentService;
use crate::config::ApiConfig;
use crate::domain::PatientInput;
use crate::ports::PredictionApi;

use super::ui::{
    dashboard::{render_dashboard, DashboardState, ServiceStatus},
    patient::{render_patient_form, PatientFormState},
    render_disclaimer,
    result::{render_result, ResultState},
};
use super::worker::{
    HealthProbe, HealthProbeHandle, RequestProgress, RequestWorker, RequestWorkerHandle,
};

/// Current screen/view in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    PatientForm,
    Result,
}

/// Main application state
pub struct App<C>
where
    C: PredictionApi + 'static,
{
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Assessment service, shared with worker threads
    service: Arc<AssessmentService<C>>,

    /// Dashboard state
    dashboard_state: DashboardState,

    /// Patient form state
    patient_form_state: PatientFormState,

    /// Result state
    result_state: ResultState,

    /// Pending prediction worker (if running)
    pending_worker: Option<RequestWorkerHandle>,

    /// Pending health probe (if running)
    pending_probe: Option<HealthProbeHandle>,

    /// Position in the sample-profile cycle for the form's demo fill.
    sample_cursor: usize,
}

impl App<HttpPredictionApi> {
    /// Create an application over the HTTP adapter with the given config.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let api = Arc::new(HttpPredictionApi::new(config)?);
        let api_base = api.config().base_url.clone();
        let service = Arc::new(AssessmentService::new(api));
        Ok(Self::with_dependencies(service, api_base))
    }
}

impl<C> App<C>
where
    C: PredictionApi + 'static,
{
    /// Create application with an injected service (Composition Root pattern).
    ///
    /// Allows `main.rs` or tests to construct the adapter externally.
    pub fn with_dependencies(service: Arc<AssessmentService<C>>, api_base: String) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            service,
            dashboard_state: DashboardState {
                api_base,
                ..DashboardState::default()
            },
            patient_form_state: PatientFormState::default(),
            result_state: ResultState::default(),
            pending_worker: None,
            pending_probe: None,
            sample_cursor: 0,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Probe the service once at startup so the dashboard is informative
        self.start_health_probe();

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Poll background work for progress updates
            self.poll_worker();
            self.poll_probe();

            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Dashboard => render_dashboard(f, content_area, &self.dashboard_state),
                    Screen::PatientForm => {
                        render_patient_form(f, content_area, &self.patient_form_state);
                    }
                    Screen::Result => render_result(f, content_area, &self.result_state),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the background worker for progress updates.
    ///
    /// Every terminal message clears `pending_worker`, so the loading state
    /// cannot outlive the request whatever its outcome was.
    fn poll_worker(&mut self) {
        if self.pending_worker.is_none() {
            return;
        }

        loop {
            let progress = match self
                .pending_worker
                .as_ref()
                .and_then(|worker| worker.try_recv())
            {
                Some(p) => p,
                None => break,
            };

            match progress {
                RequestProgress::Sending => {
                    self.result_state = ResultState::Waiting;
                }
                RequestProgress::Complete(assessment) => {
                    self.dashboard_state
                        .summary
                        .record(assessment.presentation.category);
                    self.result_state = ResultState::Complete { assessment };
                    self.pending_worker = None;
                    break;
                }
                RequestProgress::TimedOut(message) => {
                    self.result_state = ResultState::TimedOut { message };
                    self.pending_worker = None;
                    break;
                }
                RequestProgress::Failed(message) => {
                    self.result_state = ResultState::Error { message };
                    self.pending_worker = None;
                    break;
                }
            }
        }
    }

    /// Poll the health probe; fold the report into the dashboard.
    fn poll_probe(&mut self) {
        let Some(probe) = self.pending_probe.as_ref() else {
            return;
        };

        if let Some(report) = probe.try_recv() {
            self.dashboard_state.service = ServiceStatus::Reported(report);
            self.pending_probe = None;
        }
    }

    fn start_health_probe(&mut self) {
        if self.pending_probe.is_some() {
            return;
        }
        self.dashboard_state.service = ServiceStatus::Checking;
        self.pending_probe = Some(HealthProbe::spawn(self.service.clone()));
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::PatientForm => self.handle_patient_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.open_patient_form();
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.start_health_probe();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_patient_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up => {
                self.patient_form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.patient_form_state.next_field();
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.load_next_sample();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.patient_form_state.reset();
            }
            KeyCode::Char(c) => {
                self.patient_form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.patient_form_state.delete_char();
            }
            KeyCode::Delete => {
                self.patient_form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_patient_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match &self.result_state {
            ResultState::Complete { .. } => match key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.screen = Screen::Dashboard;
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.open_patient_form();
                }
                _ => {}
            },
            ResultState::TimedOut { .. } | ResultState::Error { .. } => match key {
                KeyCode::Enter => {
                    // Back to the form; the buffers were wiped on submit, so
                    // the operator re-enters the data deliberately.
                    self.screen = Screen::PatientForm;
                }
                KeyCode::Esc => {
                    self.screen = Screen::Dashboard;
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Load the next sample profile into the form. Repeated presses cycle
    /// low → medium → high.
    fn load_next_sample(&mut self) {
        let samples = [
            PatientInput::sample_low(),
            PatientInput::sample_medium(),
            PatientInput::sample_high(),
        ];
        let sample = &samples[self.sample_cursor % samples.len()];
        self.patient_form_state.load_sample(sample);
        self.sample_cursor += 1;
    }

    fn open_patient_form(&mut self) {
        self.patient_form_state = PatientFormState::default();
        self.patient_form_state.reset();
        self.screen = Screen::PatientForm;
    }

    fn submit_patient_form(&mut self) {
        // Ignore re-submission while a request is in flight
        if self.pending_worker.is_some() {
            return;
        }

        let Some(input) = self.patient_form_state.submit() else {
            // Offending fields are already flagged by the form state
            return;
        };

        self.screen = Screen::Result;
        self.result_state = ResultState::Waiting;

        let worker = RequestWorker::spawn(self.service.clone(), input);
        self.pending_worker = Some(worker);

        // Clear plaintext buffers from the UI immediately.
        self.patient_form_state.clear_sensitive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionResult;
    use crate::ports::{ApiError, HealthReport};
    use std::thread;

    struct StubApi;

    impl PredictionApi for StubApi {
        fn predict(&self, _input: &PatientInput) -> Result<PredictionResult, ApiError> {
            Ok(PredictionResult {
                probability: 0.55,
                prediction: 1,
                ..Default::default()
            })
        }

        fn health(&self) -> HealthReport {
            HealthReport::healthy(serde_json::json!({"status": "ok"}))
        }
    }

    fn test_app() -> App<StubApi> {
        let service = Arc::new(AssessmentService::new(Arc::new(StubApi)));
        App::with_dependencies(service, "http://localhost:8000".to_string())
    }

    fn wait_for_terminal_message(app: &mut App<StubApi>) {
        for _ in 0..100 {
            app.poll_worker();
            if app.pending_worker.is_none() {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("Worker never finished");
    }

    #[test]
    fn test_submit_moves_to_result_and_clears_form() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::PatientForm);

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Result);
        assert!(app.pending_worker.is_some());
        assert!(app
            .patient_form_state
            .fields
            .iter()
            .all(|f| f.value.is_empty()));

        wait_for_terminal_message(&mut app);
        match &app.result_state {
            ResultState::Complete { assessment } => {
                assert_eq!(assessment.presentation.probability_display, "55.0%");
            }
            other => panic!("Expected Complete, got {other:?}"),
        }
        assert_eq!(app.dashboard_state.summary.total(), 1);
    }

    #[test]
    fn test_invalid_submission_stays_on_form() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);

        app.patient_form_state.fields[1].value = "150".to_string();
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.screen, Screen::PatientForm);
        assert!(app.pending_worker.is_none());
        assert!(app.patient_form_state.error_message.is_some());
    }

    #[test]
    fn test_sample_key_cycles_all_three_profiles() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);

        let expected = [
            PatientInput::sample_low(),
            PatientInput::sample_medium(),
            PatientInput::sample_high(),
            PatientInput::sample_low(),
        ];
        for sample in expected {
            app.handle_key(KeyCode::Char('d'), KeyModifiers::NONE);
            assert_eq!(
                app.patient_form_state.fields[1].value,
                sample.idade.to_string()
            );
            assert_eq!(
                app.patient_form_state.submit(),
                Some(sample),
                "Every sample profile must be submittable as loaded"
            );
        }
    }

    #[test]
    fn test_ctrl_q_quits_from_any_screen() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_health_probe_updates_dashboard() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('h'), KeyModifiers::NONE);
        assert!(matches!(
            app.dashboard_state.service,
            ServiceStatus::Checking
        ));

        for _ in 0..100 {
            app.poll_probe();
            if app.pending_probe.is_none() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        match &app.dashboard_state.service {
            ServiceStatus::Reported(report) => assert!(report.is_healthy()),
            other => panic!("Expected Reported, got {other:?}"),
        }
    }
}
