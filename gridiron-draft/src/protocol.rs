// Message types exchanged between the app orchestrator and the TUI.

use chrono::{DateTime, Local};

use crate::api::Recommendation;
use crate::draft::pick::{DraftPick, Player, PlayerId};
use crate::draft::{PickAttribution, RosterSlots};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// Main content tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabId {
    #[default]
    Available,
    DraftBoard,
    MyTeam,
    Setup,
}

impl TabId {
    pub const ALL: [TabId; 4] = [
        TabId::Available,
        TabId::DraftBoard,
        TabId::MyTeam,
        TabId::Setup,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            TabId::Available => "Available",
            TabId::DraftBoard => "Draft Board",
            TabId::MyTeam => "My Team",
            TabId::Setup => "Setup",
        }
    }

    /// Tab for a number key `1`..`4`.
    pub fn from_digit(c: char) -> Option<TabId> {
        match c {
            '1' => Some(TabId::Available),
            '2' => Some(TabId::DraftBoard),
            '3' => Some(TabId::MyTeam),
            '4' => Some(TabId::Setup),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TUI -> App
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Refetch available players, the draft board, and my roster.
    Refresh,
    /// Draft a player for whoever is on the clock.
    DraftPlayer { player_id: PlayerId },
    FetchRecommendation,
    ResetDraft,
    RenameTeam { index: usize, name: String },
    MoveTeam { from: usize, to: usize },
    SetMyTeam { index: usize },
    /// Commit the setup list as the draft order.
    StartDraft,
    SwitchTab(TabId),
    Quit,
}

// ---------------------------------------------------------------------------
// App -> TUI
// ---------------------------------------------------------------------------

/// Everything the TUI renders, pushed in one piece after each change.
#[derive(Debug, Clone, Default)]
pub struct AppSnapshot {
    pub available_players: Vec<Player>,
    pub draft_board: Vec<DraftPick>,
    pub my_roster: RosterSlots,
    pub my_team: String,
    /// Team list as edited on the setup screen.
    pub team_names: Vec<String>,
    /// Draft order picks are attributed against.
    pub draft_order: Vec<String>,
    /// Next pick's attribution; `None` only when there is no draft order.
    pub on_the_clock: Option<PickAttribution>,
    pub recommendation: Option<Recommendation>,
    pub last_error: Option<String>,
    pub last_synced: Option<DateTime<Local>>,
    /// When set, the TUI switches to this tab.
    pub active_tab: Option<TabId>,
}

#[derive(Debug, Clone)]
pub enum UiUpdate {
    StateSnapshot(Box<AppSnapshot>),
    /// Short informational message for the status bar.
    Notice(String),
}
