// End-to-end tests for the submission flow.
//
// These drive `app::run` through its channels the way the TUI does, with a
// scripted balancer standing in for the remote service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use teammatch_app::app::{self, AppState, BalanceOutcome};
use teammatch_app::config::Config;
use teammatch_app::protocol::{UiUpdate, UserCommand};
use teammatch_client::{BalanceError, BalanceService};
use teammatch_core::model::{BalanceResult, Player, PlayerStats, Team};
use teammatch_core::rank::Tier;
use teammatch_core::roster::{Roster, RosterDraft};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Balancer that returns a fixed outcome and records what it was asked.
struct ScriptedService {
    outcome: BalanceOutcome,
    calls: AtomicUsize,
    last_roster: std::sync::Mutex<Option<Vec<String>>>,
}

impl ScriptedService {
    fn new(outcome: BalanceOutcome) -> Arc<Self> {
        Arc::new(ScriptedService {
            outcome,
            calls: AtomicUsize::new(0),
            last_roster: std::sync::Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BalanceService for ScriptedService {
    async fn request_balance(&self, roster: &Roster) -> BalanceOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_roster.lock().unwrap() = Some(roster.identifiers().to_vec());
        self.outcome.clone()
    }
}

/// Balancer whose request task dies before producing an outcome.
struct PanickingService;

#[async_trait]
impl BalanceService for PanickingService {
    async fn request_balance(&self, _roster: &Roster) -> BalanceOutcome {
        panic!("balancer task crashed");
    }
}

struct Harness {
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_rx: mpsc::Receiver<UiUpdate>,
    app: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    fn start(service: Arc<dyn BalanceService>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, ui_rx) = mpsc::channel(16);
        let (outcome_tx, outcome_rx) = mpsc::channel(4);
        let state = AppState::new(Config::default(), service, outcome_tx);
        let app = tokio::spawn(app::run(cmd_rx, outcome_rx, ui_tx, state));
        Harness { cmd_tx, ui_rx, app }
    }

    async fn submit(&self, draft: RosterDraft) {
        self.cmd_tx.send(UserCommand::Submit(draft)).await.unwrap();
    }

    async fn next_update(&mut self) -> UiUpdate {
        tokio::time::timeout(Duration::from_secs(5), self.ui_rx.recv())
            .await
            .expect("timed out waiting for UI update")
            .expect("UI channel closed")
    }

    async fn quit(self) {
        self.cmd_tx.send(UserCommand::Quit).await.unwrap();
        self.app.await.unwrap().unwrap();
    }
}

fn ten_ids() -> Vec<String> {
    (1..=10).map(|i| format!("player_{i}")).collect()
}

fn player(name: &str, score: f64) -> Player {
    Player {
        vanity_url: name.into(),
        steam_id: format!("7656119{name}"),
        score,
        stats: PlayerStats {
            hours: 1500.0,
            kd: 1.05,
            headshot_pct: 0.48,
            winrate: 0.52,
            accuracy: 0.19,
            damage_per_round: 82.0,
            mvps_per_match: 2.4,
        },
    }
}

/// Two five-player teams averaging 1.10 and 0.95.
fn balanced_result() -> BalanceResult {
    BalanceResult {
        team_a: Team::new(vec![
            player("a1", 1.6),
            player("a2", 1.2),
            player("a3", 1.0),
            player("a4", 0.9),
            player("a5", 0.8),
        ]),
        team_b: Team::new(vec![
            player("b1", 1.3),
            player("b2", 1.1),
            player("b3", 0.9),
            player("b4", 0.8),
            player("b5", 0.65),
        ]),
    }
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[tokio::test]
async fn successful_balance_produces_comparison() {
    let service = ScriptedService::new(Ok(balanced_result()));
    let mut harness = Harness::start(service.clone());

    harness.submit(RosterDraft::from_entries(ten_ids())).await;

    assert_eq!(harness.next_update().await, UiUpdate::RequestStarted);
    let report = match harness.next_update().await {
        UiUpdate::BalanceReady { report, .. } => report,
        other => panic!("expected BalanceReady, got {other:?}"),
    };

    let cmp = report.comparison;
    assert!((cmp.avg_a - 1.10).abs() < 1e-9);
    assert!((cmp.avg_b - 0.95).abs() < 1e-9);
    assert!((cmp.delta - 0.15).abs() < 1e-9);
    assert!((cmp.share_a - 53.66).abs() < 0.01);
    assert_eq!(report.delta_text(), "0.15");

    // Balancer order is kept, and rows are ranked.
    assert_eq!(report.team_a.players[0].vanity_url, "a1");
    assert_eq!(report.team_a.players[0].rank.tier, Tier::Elite);
    assert_eq!(report.team_b.players[4].rank.tier, Tier::Average);

    assert_eq!(service.calls(), 1);
    assert_eq!(service.last_roster.lock().unwrap().clone(), Some(ten_ids()));

    harness.quit().await;
}

#[tokio::test]
async fn server_error_is_reported_and_submit_reenabled() {
    let service = ScriptedService::new(Err(BalanceError::Service { status: 500 }));
    let mut harness = Harness::start(service.clone());

    harness.submit(RosterDraft::from_entries(ten_ids())).await;
    assert_eq!(harness.next_update().await, UiUpdate::RequestStarted);
    assert_eq!(
        harness.next_update().await,
        UiUpdate::RequestFailed("Server error: 500".into())
    );

    // The failed request is settled, so a resubmission goes out again.
    harness.submit(RosterDraft::from_entries(ten_ids())).await;
    assert_eq!(harness.next_update().await, UiUpdate::RequestStarted);
    assert_eq!(
        harness.next_update().await,
        UiUpdate::RequestFailed("Server error: 500".into())
    );
    assert_eq!(service.calls(), 2);

    harness.quit().await;
}

#[tokio::test]
async fn incomplete_roster_blocks_the_request() {
    let service = ScriptedService::new(Ok(balanced_result()));
    let mut harness = Harness::start(service.clone());

    let mut entries = ten_ids();
    entries[6] = String::new();
    harness.submit(RosterDraft::from_entries(entries)).await;

    assert_eq!(
        harness.next_update().await,
        UiUpdate::ValidationFailed("Need exactly 10 vanity URLs".into())
    );
    assert_eq!(service.calls(), 0);

    harness.quit().await;
}

#[tokio::test]
async fn transport_and_malformed_failures_are_recoverable() {
    let service = ScriptedService::new(Err(BalanceError::Transport {
        cause: "connection refused".into(),
    }));
    let mut harness = Harness::start(service);
    harness.submit(RosterDraft::from_entries(ten_ids())).await;
    assert_eq!(harness.next_update().await, UiUpdate::RequestStarted);
    assert_eq!(
        harness.next_update().await,
        UiUpdate::RequestFailed("Network error: connection refused".into())
    );
    harness.quit().await;

    let service = ScriptedService::new(Err(BalanceError::Malformed {
        detail: "missing field `team_b`".into(),
    }));
    let mut harness = Harness::start(service);
    harness.submit(RosterDraft::from_entries(ten_ids())).await;
    assert_eq!(harness.next_update().await, UiUpdate::RequestStarted);
    assert_eq!(
        harness.next_update().await,
        UiUpdate::RequestFailed("Malformed response from server".into())
    );
    harness.quit().await;
}

#[tokio::test]
async fn identical_submissions_each_hit_the_service() {
    let service = ScriptedService::new(Ok(balanced_result()));
    let mut harness = Harness::start(service.clone());

    for _ in 0..3 {
        harness.submit(RosterDraft::from_entries(ten_ids())).await;
        assert_eq!(harness.next_update().await, UiUpdate::RequestStarted);
        assert!(matches!(
            harness.next_update().await,
            UiUpdate::BalanceReady { .. }
        ));
    }
    assert_eq!(service.calls(), 3);

    harness.quit().await;
}

#[tokio::test]
async fn crashed_request_task_does_not_wedge_submissions() {
    let mut harness = Harness::start(Arc::new(PanickingService));

    for _ in 0..2 {
        harness.submit(RosterDraft::from_entries(ten_ids())).await;
        assert_eq!(harness.next_update().await, UiUpdate::RequestStarted);
        assert_eq!(
            harness.next_update().await,
            UiUpdate::RequestFailed("Network error: balance request ended unexpectedly".into())
        );
    }

    harness.quit().await;
}
