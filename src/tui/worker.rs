//! Background workers for non-blocking API calls.
//!
//! The prediction request and the health probe run on plain threads and
//! report back over `mpsc`; the TUI main loop polls the channel each frame
//! and never blocks on the network.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::{Assessment, AssessmentService};
use crate::domain::PatientInput;
use crate::ports::{ApiError, HealthReport, PredictionApi};
use crate::PressuraError;

/// Progress updates from the request worker.
///
/// Exactly one terminal message (`Complete`, `TimedOut`, `Failed`) is sent
/// per submission; the app clears its loading state on any of them.
#[derive(Debug, Clone)]
pub enum RequestProgress {
    /// Request handed to the HTTP client
    Sending,
    /// Assessment finished
    Complete(Box<Assessment>),
    /// The request expired; distinct from a generic failure
    TimedOut(String),
    /// Any other failure, with a user-facing message
    Failed(String),
}

/// Handle to a running request worker.
pub struct RequestWorkerHandle {
    progress_rx: Receiver<RequestProgress>,
    _handle: JoinHandle<()>,
}

impl RequestWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<RequestProgress> {
        self.progress_rx.try_recv().ok()
    }
}

/// Worker that runs one prediction request in the background.
pub struct RequestWorker;

impl RequestWorker {
    /// Spawn a background request for an already-parsed patient record.
    ///
    /// Returns a handle to receive progress updates.
    pub fn spawn<C>(
        service: Arc<AssessmentService<C>>,
        input: PatientInput,
    ) -> RequestWorkerHandle
    where
        C: PredictionApi + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run(service, input, &tx);
        });

        RequestWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run<C>(
        service: Arc<AssessmentService<C>>,
        input: PatientInput,
        tx: &Sender<RequestProgress>,
    ) where
        C: PredictionApi + 'static,
    {
        let _ = tx.send(RequestProgress::Sending);

        let terminal_msg = match service.assess(input) {
            Ok(assessment) => RequestProgress::Complete(Box::new(assessment)),
            Err(PressuraError::Api(e @ ApiError::Timeout(_))) => {
                RequestProgress::TimedOut(e.to_string())
            }
            Err(e) => RequestProgress::Failed(e.to_string()),
        };

        let _ = tx.send(terminal_msg);
    }
}

/// Handle to a running health probe.
pub struct HealthProbeHandle {
    report_rx: Receiver<HealthReport>,
    _handle: JoinHandle<()>,
}

impl HealthProbeHandle {
    /// Try to receive the report (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<HealthReport> {
        self.report_rx.try_recv().ok()
    }
}

/// Background health check against the service.
pub struct HealthProbe;

impl HealthProbe {
    /// Spawn a health check; the report arrives on the handle.
    pub fn spawn<C>(service: Arc<AssessmentService<C>>) -> HealthProbeHandle
    where
        C: PredictionApi + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let _ = tx.send(service.check_health());
        });

        HealthProbeHandle {
            report_rx: rx,
            _handle: handle,
        }
    }
}
