// Application state and orchestration logic.
//
// A single event loop owns the submission lifecycle: validate the draft,
// issue exactly one balance request, and publish either the rendered report
// or a failure message to the TUI. At most one request is in flight; further
// submissions are ignored until it settles.

use std::sync::Arc;

use teammatch_client::{BalanceError, BalanceService};
use teammatch_core::model::BalanceResult;
use teammatch_core::report::BalanceReport;
use teammatch_core::roster::{self, RosterDraft, ValidationError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::protocol::{UiUpdate, UserCommand};

/// Result of one balance request, delivered back to the event loop.
pub type BalanceOutcome = Result<BalanceResult, BalanceError>;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub config: Config,
    /// Balancer used for every submission. Shared with the request task.
    pub service: Arc<dyn BalanceService>,
    /// Whether a request is outstanding.
    pub in_flight: bool,
    /// Number of requests issued this session.
    pub requests_sent: u64,
    pub current_request: Option<JoinHandle<()>>,
    /// Sender handed to each request task to report its outcome.
    pub outcome_tx: mpsc::Sender<BalanceOutcome>,
}

impl AppState {
    pub fn new(
        config: Config,
        service: Arc<dyn BalanceService>,
        outcome_tx: mpsc::Sender<BalanceOutcome>,
    ) -> Self {
        AppState {
            config,
            service,
            in_flight: false,
            requests_sent: 0,
            current_request: None,
            outcome_tx,
        }
    }

    /// Validate a draft and, if it passes, start the one request for it.
    ///
    /// Returns the UI update describing what happened, or `None` when the
    /// submission was ignored because a request is already outstanding.
    pub fn submit(&mut self, draft: &RosterDraft) -> Option<UiUpdate> {
        if self.in_flight {
            debug!("submission ignored: request already in flight");
            return None;
        }

        let roster = match roster::validate(draft) {
            Ok(roster) => roster,
            Err(err @ ValidationError::IncompleteRoster { found }) => {
                info!(found, "roster incomplete, request not sent");
                return Some(UiUpdate::ValidationFailed(err.to_string()));
            }
        };

        self.in_flight = true;
        self.requests_sent += 1;
        info!(request = self.requests_sent, "submitting roster for balancing");

        let service = Arc::clone(&self.service);
        let mut guard = OutcomeGuard {
            tx: Some(self.outcome_tx.clone()),
        };
        self.current_request = Some(tokio::spawn(async move {
            let outcome = service.request_balance(&roster).await;
            if let Some(tx) = guard.tx.take() {
                let _ = tx.send(outcome).await;
            }
        }));

        Some(UiUpdate::RequestStarted)
    }

    /// Settle the outstanding request and build the update for the TUI.
    pub fn complete(&mut self, outcome: BalanceOutcome) -> UiUpdate {
        self.in_flight = false;
        self.current_request = None;

        match outcome {
            Ok(result) => {
                let report = BalanceReport::build(&result, &self.config.ui.profile_url_base);
                info!(
                    avg_a = report.comparison.avg_a,
                    avg_b = report.comparison.avg_b,
                    delta = report.comparison.delta,
                    "teams balanced"
                );
                UiUpdate::BalanceReady {
                    report: Box::new(report),
                    completed_at: chrono::Local::now(),
                }
            }
            Err(err) => {
                if let BalanceError::Malformed { detail } = &err {
                    warn!(%detail, "balance request failed: malformed response");
                } else {
                    warn!(error = %err, "balance request failed");
                }
                UiUpdate::RequestFailed(err.to_string())
            }
        }
    }

    fn abort_request(&mut self) {
        if let Some(handle) = self.current_request.take() {
            handle.abort();
        }
    }
}

/// Reports a transport failure if a request task ends without sending its
/// outcome (panic or abort), so `in_flight` never stays set.
struct OutcomeGuard {
    tx: Option<mpsc::Sender<BalanceOutcome>>,
}

impl Drop for OutcomeGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            warn!("balance request task ended without an outcome");
            let _ = tx.try_send(Err(BalanceError::Transport {
                cause: "balance request ended unexpectedly".into(),
            }));
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the orchestrator until the user quits or the command channel closes.
///
/// Listens on two channels with `tokio::select!`:
/// 1. User commands from the TUI
/// 2. Outcomes of spawned balance requests
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut outcome_rx: mpsc::Receiver<BalanceOutcome>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Submit(draft)) => {
                        if let Some(update) = state.submit(&draft) {
                            let _ = ui_tx.send(update).await;
                        }
                    }
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            Some(outcome) = outcome_rx.recv() => {
                let update = state.complete(outcome);
                let _ = ui_tx.send(update).await;
            }
        }
    }

    state.abort_request();
    info!("Application event loop exiting");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
