// Application state and orchestration logic.
//
// The central event loop that turns user commands from the TUI into backend
// calls, keeps the last fetched draft data, and pushes full snapshots back to
// the TUI render loop.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api::{ApiError, DraftBackend, PickRequest, Recommendation};
use crate::config::Config;
use crate::draft::order::move_entry;
use crate::draft::pick::{DraftPick, Player, PlayerId};
use crate::draft::{attribute, classify, DraftOrder, PickAttribution, RosterSlots};
use crate::protocol::{AppSnapshot, TabId, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete client state. Everything except the setup list and the
/// committed order is a copy of what the backend last returned.
pub struct AppState {
    pub config: Config,
    backend: Arc<dyn DraftBackend>,
    /// Team names as edited on the setup screen.
    pub team_names: Vec<String>,
    /// Order picks are attributed against. Starts as the configured team
    /// list and is replaced by `start_draft`; `None` only without teams.
    pub draft_order: Option<DraftOrder>,
    pub my_team: String,
    pub available_players: Vec<Player>,
    pub draft_board: Vec<DraftPick>,
    pub my_roster: RosterSlots,
    pub recommendation: Option<Recommendation>,
    pub last_error: Option<String>,
    pub last_synced: Option<DateTime<Local>>,
    pub active_tab: TabId,
    /// Tab the TUI should switch to with the next snapshot.
    pending_tab: Option<TabId>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn DraftBackend>) -> Self {
        let team_names = config.league.teams.clone();
        let my_team = config.league.my_team.clone();
        let draft_order = DraftOrder::new(team_names.clone()).ok();
        AppState {
            config,
            backend,
            team_names,
            draft_order,
            my_team,
            available_players: Vec::new(),
            draft_board: Vec::new(),
            my_roster: RosterSlots::default(),
            recommendation: None,
            last_error: None,
            last_synced: None,
            active_tab: TabId::Available,
            pending_tab: Some(TabId::Available),
        }
    }

    // --- Backend reads -----------------------------------------------------

    /// Refetch available players, the draft board, and my roster.
    ///
    /// The three requests run concurrently. Whatever succeeds is applied; the
    /// first failure is returned.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let backend = Arc::clone(&self.backend);
        let (players, board, roster) = tokio::join!(
            backend.available_players(),
            backend.draft_board(),
            backend.team_roster(&self.my_team),
        );

        let mut first_err = None;

        match players {
            Ok(players) => self.available_players = players,
            Err(e) => first_err = first_err.or(Some(e)),
        }
        match board {
            Ok(board) => self.draft_board = board,
            Err(e) => first_err = first_err.or(Some(e)),
        }
        match roster {
            Ok(roster) => self.my_roster = classify(&roster),
            Err(e) => first_err = first_err.or(Some(e)),
        }

        match first_err {
            Some(e) => Err(e),
            None => {
                self.last_synced = Some(Local::now());
                debug!(
                    players = self.available_players.len(),
                    picks = self.draft_board.len(),
                    roster = self.my_roster.player_count(),
                    "refreshed draft data"
                );
                Ok(())
            }
        }
    }

    /// Refetch only my roster, e.g. after switching which team is mine.
    pub async fn refresh_roster(&mut self) -> Result<(), ApiError> {
        let roster = self.backend.team_roster(&self.my_team).await?;
        self.my_roster = classify(&roster);
        Ok(())
    }

    pub async fn fetch_recommendation(&mut self) -> Result<(), ApiError> {
        self.recommendation = self.backend.recommendation().await?;
        match &self.recommendation {
            Some(rec) => info!("Recommendation: {}", rec.headline()),
            None => info!("No recommendation available"),
        }
        Ok(())
    }

    // --- Draft actions -----------------------------------------------------

    /// Attribution of the next pick, if there is a draft order.
    pub fn next_pick(&self) -> Option<PickAttribution> {
        self.draft_order
            .as_ref()
            .and_then(|order| order.on_the_clock(self.draft_board.len()).ok())
    }

    /// Draft `player_id` for whoever is on the clock, then refresh.
    ///
    /// Nothing is refreshed if the submission fails.
    pub async fn draft_player(&mut self, player_id: PlayerId) -> anyhow::Result<PickAttribution> {
        let drafters = self
            .draft_order
            .as_ref()
            .map(DraftOrder::drafters)
            .unwrap_or(&[]);
        let attribution = attribute(self.draft_board.len(), drafters)
            .context("cannot attribute the next pick")?;

        let request = PickRequest::new(player_id, &attribution);
        self.backend
            .submit_pick(&request)
            .await
            .context("failed to submit pick")?;
        info!(
            "Pick {} (round {}): {} took player {}",
            attribution.pick_number, attribution.round, attribution.drafter, request.player_id
        );

        self.refresh().await.context("pick saved but refresh failed")?;
        Ok(attribution)
    }

    /// Clear all picks on the backend and return to the setup screen. The
    /// draft order is kept.
    pub async fn reset_draft(&mut self) -> anyhow::Result<()> {
        self.backend
            .reset_draft()
            .await
            .context("failed to reset draft")?;
        info!("Draft reset");

        self.recommendation = None;
        self.pending_tab = Some(TabId::Setup);
        self.refresh().await.context("draft reset but refresh failed")?;
        Ok(())
    }

    // --- Setup edits -------------------------------------------------------
    // These change the setup list only; `start_draft` commits it.

    pub fn rename_team(&mut self, index: usize, name: &str) -> anyhow::Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("team name must not be blank");
        }
        let Some(old) = self.team_names.get(index).cloned() else {
            warn!(index, "rename ignored: no team at index");
            return Ok(());
        };
        if self
            .team_names
            .iter()
            .enumerate()
            .any(|(i, n)| i != index && n == name)
        {
            bail!("a team named `{name}` already exists");
        }

        self.team_names[index] = name.to_string();
        if self.my_team == old {
            self.my_team = name.to_string();
        }
        info!("Renamed team {} from `{}` to `{}`", index + 1, old, name);
        Ok(())
    }

    pub fn move_team(&mut self, from: usize, to: usize) -> anyhow::Result<()> {
        if !move_entry(&mut self.team_names, from, to) {
            warn!(from, to, "move ignored: index out of range");
        }
        Ok(())
    }

    pub fn set_my_team(&mut self, index: usize) -> anyhow::Result<()> {
        match self.team_names.get(index) {
            Some(name) => {
                self.my_team = name.clone();
                info!("My team is now `{}`", self.my_team);
            }
            None => warn!(index, "set-my-team ignored: no team at index"),
        }
        Ok(())
    }

    /// Commit the setup list as the draft order, replacing the previous one,
    /// and move to the player list.
    pub fn start_draft(&mut self) -> anyhow::Result<()> {
        let order = DraftOrder::new(self.team_names.clone())?;
        info!("Draft order set: {:?}", order.drafters());
        self.draft_order = Some(order);
        self.pending_tab = Some(TabId::Available);
        Ok(())
    }

    // --- Snapshot ----------------------------------------------------------

    /// Capture everything the TUI renders. A pending tab switch is handed
    /// over exactly once.
    pub fn build_snapshot(&mut self) -> AppSnapshot {
        AppSnapshot {
            available_players: self.available_players.clone(),
            draft_board: self.draft_board.clone(),
            my_roster: self.my_roster.clone(),
            my_team: self.my_team.clone(),
            team_names: self.team_names.clone(),
            draft_order: self
                .draft_order
                .as_ref()
                .map(|o| o.drafters().to_vec())
                .unwrap_or_default(),
            on_the_clock: self.next_pick(),
            recommendation: self.recommendation.clone(),
            last_error: self.last_error.clone(),
            last_synced: self.last_synced,
            active_tab: self.pending_tab.take(),
        }
    }

    /// Record the outcome of a command for the status bar.
    fn record<T, E: std::fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(v) => {
                self.last_error = None;
                Some(v)
            }
            Err(e) => {
                let message = format!("{e:#}");
                warn!("{}", message);
                self.last_error = Some(message);
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the application event loop.
///
/// Performs an initial refresh, then listens for user commands and (if
/// configured) a polling timer. Pushes a full snapshot through `ui_tx` after
/// each handled event.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let poll_every = state.config.refresh.interval();
    let mut poll = tokio::time::interval(poll_every.unwrap_or(Duration::from_secs(3600)));
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the initial refresh below covers it.
    poll.tick().await;

    let result = state.refresh().await;
    state.record(result);
    send_snapshot(&mut state, &ui_tx).await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            _ = poll.tick(), if poll_every.is_some() => {
                debug!("Polling backend");
                let result = state.refresh().await;
                state.record(result);
                send_snapshot(&mut state, &ui_tx).await;
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

async fn send_snapshot(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.build_snapshot();
    let _ = ui_tx
        .send(UiUpdate::StateSnapshot(Box::new(snapshot)))
        .await;
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::SwitchTab(tab) => {
            state.active_tab = tab;
            debug!("Switched to tab: {:?}", tab);
            // Purely a TUI concern; no snapshot needed.
            return;
        }
        UserCommand::Refresh => {
            let result = state.refresh().await;
            state.record(result);
        }
        UserCommand::DraftPlayer { player_id } => {
            let result = state.draft_player(player_id).await;
            if let Some(pick) = state.record(result) {
                let _ = ui_tx
                    .send(UiUpdate::Notice(format!(
                        "Pick {} (round {}) made for {}",
                        pick.pick_number, pick.round, pick.drafter
                    )))
                    .await;
            }
        }
        UserCommand::FetchRecommendation => {
            let result = state.fetch_recommendation().await;
            state.record(result);
            if state.last_error.is_none() && state.recommendation.is_none() {
                let _ = ui_tx
                    .send(UiUpdate::Notice("No recommendation available".into()))
                    .await;
            }
        }
        UserCommand::ResetDraft => {
            let result = state.reset_draft().await;
            state.record(result);
        }
        UserCommand::RenameTeam { index, name } => {
            let result = state.rename_team(index, &name);
            state.record(result);
        }
        UserCommand::MoveTeam { from, to } => {
            let result = state.move_team(from, to);
            state.record(result);
        }
        UserCommand::SetMyTeam { index } => {
            let result = state.set_my_team(index);
            if state.record(result).is_some() {
                let result = state.refresh_roster().await;
                state.record(result);
            }
        }
        UserCommand::StartDraft => {
            let result = state.start_draft();
            if state.record(result).is_some() {
                let result = state.refresh().await;
                state.record(result);
            }
        }
        UserCommand::Quit => {
            // Handled in the main loop
            return;
        }
    }

    send_snapshot(state, ui_tx).await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
