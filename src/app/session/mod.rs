// Upload session - Owns the selected file and the lifecycle state of one analysis

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::SessionRules;
use crate::ports::AnalysisPort;

/// Controller for a single upload-and-analyze session
///
/// Only this type mutates [`SessionState`]. Presenters observe it through
/// [`UploadSession::subscribe`]. Selection and submission are rejected with
/// [`DomainError::Busy`] while a submission is in flight; the check and the
/// transition into `Submitting` happen under the state channel's lock, so two
/// concurrent callers cannot both start a request.
pub struct UploadSession {
    analysis_port: Arc<dyn AnalysisPort>,
    state: watch::Sender<SessionState>,
    selected: Mutex<Option<Arc<SelectedFile>>>,
}

impl UploadSession {
    /// Create an idle session bound to an analysis service
    pub fn new(analysis_port: Arc<dyn AnalysisPort>) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            analysis_port,
            state,
            selected: Mutex::new(None),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that sees every state change from now on
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Description of the currently selected file
    pub fn selected(&self) -> Option<FileSummary> {
        self.lock_selected().as_ref().map(|file| file.summary())
    }

    /// Store a new selection, clearing any previous result or error
    ///
    /// `None` means the user confirmed the picker with nothing chosen; the
    /// session then fails with "No file selected" and keeps the prior file.
    pub fn select_file(&self, file: Option<SelectedFile>) -> Result<(), DomainError> {
        let mut outcome = Ok(());

        self.state.send_if_modified(|state| {
            let next = match file {
                Some(file) => SessionRules::on_select(state).map(|next| {
                    debug!(file = %file.name(), category = %file.category(), "File selected");
                    *self.lock_selected() = Some(Arc::new(file));
                    next
                }),
                None => SessionRules::on_empty_select(state),
            };

            match next {
                Ok(next) => {
                    if let SessionState::Failed(_) = next {
                        outcome = Err(DomainError::NoFileSelected);
                    }
                    *state = next;
                    true
                }
                Err(err) => {
                    warn!("Selection rejected: {}", err);
                    outcome = Err(err);
                    false
                }
            }
        });

        outcome
    }

    /// Upload the selected file and wait for the verdict
    ///
    /// On return the session is `Succeeded` or `Failed`, unless the call was
    /// rejected with `Busy`, in which case the in-flight submission is left
    /// untouched. There is no retry or timeout. Dropping the returned future
    /// mid-request ends the session `Failed("Analysis cancelled")`.
    pub async fn submit(&self) -> Result<AnalysisResult, DomainError> {
        let mut start: Result<Arc<SelectedFile>, DomainError> = Err(DomainError::MissingInput);

        self.state.send_if_modified(|state| {
            let selected = self.lock_selected().clone();
            start = SessionRules::can_submit(state, selected.is_some())
                .and_then(|()| selected.ok_or(DomainError::MissingInput));

            match &start {
                Ok(_) => {
                    *state = SessionState::Submitting;
                    true
                }
                Err(DomainError::Busy) => false,
                Err(err) => {
                    *state = SessionRules::on_complete(Err(err.clone()));
                    true
                }
            }
        });

        let file = match start {
            Ok(file) => file,
            Err(err) => {
                warn!("Submission not started: {}", err);
                return Err(err);
            }
        };

        let mut in_flight = InFlight::new(&self.state);

        info!(
            file = %file.name(),
            category = %file.category(),
            url = %self.analysis_port.base_url(),
            "Submitting file for analysis"
        );

        let outcome = self.analysis_port.analyze(&file).await;

        match &outcome {
            Ok(_) => info!(file = %file.name(), "Analysis succeeded"),
            Err(err) => warn!(file = %file.name(), "Analysis failed: {}", err),
        }

        in_flight.disarm();
        self.state.send_replace(SessionRules::on_complete(outcome.clone()));
        outcome
    }

    fn lock_selected(&self) -> MutexGuard<'_, Option<Arc<SelectedFile>>> {
        self.selected.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Leaves `Submitting` if a submission future is dropped mid-request
struct InFlight<'a> {
    state: &'a watch::Sender<SessionState>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a watch::Sender<SessionState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Submission dropped before the service answered");
            self.state
                .send_replace(SessionRules::on_complete(Err(DomainError::Cancelled)));
        }
    }
}
