// Messages exchanged between the terminal front end and the app orchestrator.

use chrono::{DateTime, Local};
use teammatch_core::report::BalanceReport;
use teammatch_core::roster::RosterDraft;

/// Commands sent from the TUI to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Submit a snapshot of the roster form.
    Submit(RosterDraft),
    Quit,
}

/// Updates pushed from the orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// The draft failed validation; no request was sent.
    ValidationFailed(String),
    /// A balance request is now in flight. Any previous result is stale.
    RequestStarted,
    /// The request succeeded.
    BalanceReady {
        report: Box<BalanceReport>,
        completed_at: DateTime<Local>,
    },
    /// The request failed; the message is ready for display.
    RequestFailed(String),
}

/// Lifecycle of the most recent submission, as shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}
