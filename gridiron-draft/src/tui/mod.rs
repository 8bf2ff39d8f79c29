// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the last snapshot pushed by the app
// orchestrator, plus purely local state (cursor positions, search text,
// confirmation prompts). It applies `UiUpdate` messages as they arrive and
// re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::api::Recommendation;
use crate::draft::pick::{DraftPick, Player, Position};
use crate::draft::{PickAttribution, RosterSlots};
use crate::protocol::{AppSnapshot, TabId, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Action awaiting a y/n answer in the confirmation overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Quit,
    ResetDraft,
}

/// TUI-local state that mirrors the application state for rendering.
pub struct ViewState {
    pub available_players: Vec<Player>,
    pub draft_board: Vec<DraftPick>,
    pub my_roster: RosterSlots,
    pub my_team: String,
    pub team_names: Vec<String>,
    pub draft_order: Vec<String>,
    pub on_the_clock: Option<PickAttribution>,
    pub recommendation: Option<Recommendation>,
    pub last_error: Option<String>,
    pub last_synced: Option<DateTime<Local>>,
    /// Most recent informational message from the app.
    pub notice: Option<String>,
    /// Which tab is active in the main panel.
    pub active_tab: TabId,
    /// Per-widget scroll offsets (keyed by widget name).
    pub scroll_offset: HashMap<String, usize>,
    /// Current player name search text.
    pub filter_text: String,
    /// Whether the search input is active.
    pub filter_mode: bool,
    /// Position filter for the available players table.
    pub position_filter: Option<Position>,
    /// Cursor row in the filtered available players table.
    pub selected_player: usize,
    /// Cursor row in the setup team list.
    pub selected_team: usize,
    /// Text being typed while renaming the selected team.
    pub rename_buffer: Option<String>,
    /// Pending confirmation, if the overlay is showing.
    pub confirm: Option<ConfirmAction>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            available_players: Vec::new(),
            draft_board: Vec::new(),
            my_roster: RosterSlots::default(),
            my_team: String::new(),
            team_names: Vec::new(),
            draft_order: Vec::new(),
            on_the_clock: None,
            recommendation: None,
            last_error: None,
            last_synced: None,
            notice: None,
            active_tab: TabId::Available,
            scroll_offset: HashMap::new(),
            filter_text: String::new(),
            filter_mode: false,
            position_filter: None,
            selected_player: 0,
            selected_team: 0,
            rename_buffer: None,
            confirm: None,
        }
    }
}

impl ViewState {
    /// Apply a full state snapshot from the app orchestrator.
    ///
    /// Local fields (cursors, search, scroll offsets) are kept, but cursors
    /// are clamped to the new list lengths.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        self.available_players = snapshot.available_players;
        self.draft_board = snapshot.draft_board;
        self.my_roster = snapshot.my_roster;
        self.my_team = snapshot.my_team;
        self.team_names = snapshot.team_names;
        self.draft_order = snapshot.draft_order;
        self.on_the_clock = snapshot.on_the_clock;
        self.recommendation = snapshot.recommendation;
        self.last_error = snapshot.last_error;
        self.last_synced = snapshot.last_synced;
        if let Some(tab) = snapshot.active_tab {
            self.active_tab = tab;
        }

        self.selected_team = self
            .selected_team
            .min(self.team_names.len().saturating_sub(1));
        let visible = self.filtered_players().len();
        self.selected_player = self.selected_player.min(visible.saturating_sub(1));
    }

    /// Available players after the search text and position filter.
    pub fn filtered_players(&self) -> Vec<&Player> {
        widgets::available::filter_players(
            &self.available_players,
            self.position_filter,
            &self.filter_text,
        )
    }

    /// The player under the cursor on the Available tab.
    pub fn selected_available(&self) -> Option<&Player> {
        self.filtered_players().get(self.selected_player).copied()
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::Notice(message) => {
            state.notice = Some(message);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    match state.active_tab {
        TabId::Available => widgets::available::render(frame, layout.main_panel, state),
        TabId::DraftBoard => widgets::draft_board::render(frame, layout.main_panel, state),
        TabId::MyTeam => widgets::roster::render(frame, layout.main_panel, state),
        TabId::Setup => widgets::setup::render(frame, layout.main_panel, state),
    }
    layout::render_help_bar(frame, layout.help_bar, state);

    if let Some(action) = state.confirm {
        widgets::confirm::render(frame, frame.area(), action);
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Set panic hook to restore terminal on crash.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 3. Create ViewState
    let mut view_state = ViewState::default();

    // 4. Create crossterm EventStream for async keyboard input
    let mut event_stream = EventStream::new();

    // 5. Create render interval (~30fps)
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 6. Main loop
    let result = loop {
        tokio::select! {
            // UI updates from the app orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Channel closed: app is shutting down
                    None => break Ok(()),
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    // Mouse, resize, focus events
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::new(e).context("terminal input error")),
                    None => break Ok(()),
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    // 7. Restore terminal
    ratatui::restore();

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
