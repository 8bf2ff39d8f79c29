// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (cursor movement,
// search text, confirmation prompts).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{ConfirmAction, ViewState};
use crate::draft::pick::Position;
use crate::protocol::{TabId, UserCommand};

/// Positions visited by the `p` key, after "All" (no filter).
///
/// All -> QB -> RB -> WR -> TE -> K -> DEF -> All
const POSITION_CYCLE: &[Position] = &Position::ALL;

/// Page size for PageUp/PageDown.
const PAGE_SIZE: usize = 20;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when the key press was handled locally by
/// mutating `ViewState`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if let Some(action) = view_state.confirm {
        return handle_confirm(key_event, view_state, action);
    }

    if view_state.rename_buffer.is_some() {
        return handle_rename_mode(key_event, view_state);
    }

    if view_state.filter_mode {
        return handle_filter_mode(key_event, view_state);
    }

    // Keys that only mean something on one tab
    let tab_specific = match view_state.active_tab {
        TabId::Available => handle_available_key(key_event, view_state),
        TabId::Setup => handle_setup_key(key_event, view_state),
        TabId::DraftBoard | TabId::MyTeam => None,
    };
    if let Some(outcome) = tab_specific {
        return outcome;
    }

    // Normal mode key dispatch
    match key_event.code {
        KeyCode::Char(c @ '1'..='4') => {
            let tab = TabId::from_digit(c)?;
            view_state.active_tab = tab;
            Some(UserCommand::SwitchTab(tab))
        }

        KeyCode::Up | KeyCode::Char('k') => {
            move_cursor_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_cursor_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            move_cursor_up(view_state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            move_cursor_down(view_state, PAGE_SIZE);
            None
        }

        KeyCode::Esc => {
            view_state.filter_text.clear();
            view_state.position_filter = None;
            view_state.notice = None;
            None
        }

        KeyCode::Char('r') => Some(UserCommand::Refresh),
        KeyCode::Char('g') => Some(UserCommand::FetchRecommendation),
        KeyCode::Char('R') => {
            view_state.confirm = Some(ConfirmAction::ResetDraft);
            None
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.confirm = Some(ConfirmAction::Quit);
            None
        }

        _ => None,
    }
}

/// Available tab keys. Outer `None` means "not handled here".
fn handle_available_key(
    key_event: KeyEvent,
    view_state: &mut ViewState,
) -> Option<Option<UserCommand>> {
    match key_event.code {
        KeyCode::Char('/') => {
            view_state.filter_mode = true;
            Some(None)
        }
        KeyCode::Char('p') => {
            cycle_position_filter(view_state);
            view_state.selected_player = 0;
            Some(None)
        }
        KeyCode::Enter => {
            let cmd = view_state
                .selected_available()
                .map(|p| UserCommand::DraftPlayer {
                    player_id: p.id.clone(),
                });
            Some(cmd)
        }
        _ => None,
    }
}

/// Setup tab keys. Outer `None` means "not handled here".
fn handle_setup_key(
    key_event: KeyEvent,
    view_state: &mut ViewState,
) -> Option<Option<UserCommand>> {
    let selected = view_state.selected_team;
    let count = view_state.team_names.len();

    match key_event.code {
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(name) = view_state.team_names.get(selected) {
                view_state.rename_buffer = Some(name.clone());
            }
            Some(None)
        }
        KeyCode::Char('K') => {
            if selected == 0 || selected >= count {
                return Some(None);
            }
            view_state.selected_team = selected - 1;
            Some(Some(UserCommand::MoveTeam {
                from: selected,
                to: selected - 1,
            }))
        }
        KeyCode::Char('J') => {
            if selected + 1 >= count {
                return Some(None);
            }
            view_state.selected_team = selected + 1;
            Some(Some(UserCommand::MoveTeam {
                from: selected,
                to: selected + 1,
            }))
        }
        KeyCode::Char('*') => {
            if selected >= count {
                return Some(None);
            }
            Some(Some(UserCommand::SetMyTeam { index: selected }))
        }
        KeyCode::Char('s') => Some(Some(UserCommand::StartDraft)),
        _ => None,
    }
}

/// Handle key events while the confirmation overlay is showing.
///
/// - `y` confirms (and `q` also confirms a pending quit)
/// - `n` or `Esc` cancels
/// - All other keys are blocked
fn handle_confirm(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    action: ConfirmAction,
) -> Option<UserCommand> {
    let confirmed = match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => true,
        KeyCode::Char('q') | KeyCode::Char('Q') => action == ConfirmAction::Quit,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm = None;
            return None;
        }
        _ => return None,
    };
    if !confirmed {
        return None;
    }

    view_state.confirm = None;
    match action {
        ConfirmAction::Quit => Some(UserCommand::Quit),
        ConfirmAction::ResetDraft => {
            view_state.selected_player = 0;
            view_state.selected_team = 0;
            Some(UserCommand::ResetDraft)
        }
    }
}

/// Handle key events while renaming a team on the setup tab.
fn handle_rename_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.rename_buffer = None;
            None
        }
        KeyCode::Enter => {
            let name = view_state.rename_buffer.take()?;
            Some(UserCommand::RenameTeam {
                index: view_state.selected_team,
                name,
            })
        }
        KeyCode::Backspace => {
            if let Some(buf) = view_state.rename_buffer.as_mut() {
                buf.pop();
            }
            None
        }
        KeyCode::Char(c) => {
            if let Some(buf) = view_state.rename_buffer.as_mut() {
                buf.push(c);
            }
            None
        }
        _ => None,
    }
}

/// Handle key events while typing a player search.
///
/// - Printable characters are appended to filter_text
/// - Backspace removes the last character
/// - Enter keeps the text, Esc clears it; both leave search mode
fn handle_filter_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.filter_mode = false;
            view_state.filter_text.clear();
        }
        KeyCode::Enter => {
            view_state.filter_mode = false;
        }
        KeyCode::Backspace => {
            view_state.filter_text.pop();
        }
        KeyCode::Char(c) => {
            view_state.filter_text.push(c);
        }
        _ => return None,
    }
    view_state.selected_player = 0;
    None
}

/// Cycle the position filter: All -> QB -> RB -> WR -> TE -> K -> DEF -> All.
fn cycle_position_filter(view_state: &mut ViewState) {
    view_state.position_filter = match view_state.position_filter {
        None => Some(POSITION_CYCLE[0]),
        Some(current) => {
            let idx = POSITION_CYCLE.iter().position(|p| *p == current);
            match idx {
                Some(i) if i + 1 < POSITION_CYCLE.len() => Some(POSITION_CYCLE[i + 1]),
                _ => None,
            }
        }
    };
}

/// Get the widget key for scroll state based on the active tab.
fn active_widget_key(view_state: &ViewState) -> &'static str {
    match view_state.active_tab {
        TabId::Available => "available",
        TabId::DraftBoard => "draft_board",
        TabId::MyTeam => "roster",
        TabId::Setup => "setup",
    }
}

/// Move the cursor (Available, Setup) or scroll (other tabs) up.
fn move_cursor_up(view_state: &mut ViewState, lines: usize) {
    match view_state.active_tab {
        TabId::Available => {
            view_state.selected_player = view_state.selected_player.saturating_sub(lines);
        }
        TabId::Setup => {
            view_state.selected_team = view_state.selected_team.saturating_sub(lines);
        }
        TabId::DraftBoard | TabId::MyTeam => {
            let key = active_widget_key(view_state);
            let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
            *offset = offset.saturating_sub(lines);
        }
    }
}

/// Move the cursor (Available, Setup) or scroll (other tabs) down.
///
/// Cursors stop at the last row; scroll offsets are clamped when rendering.
fn move_cursor_down(view_state: &mut ViewState, lines: usize) {
    match view_state.active_tab {
        TabId::Available => {
            let last = view_state.filtered_players().len().saturating_sub(1);
            view_state.selected_player = view_state.selected_player.saturating_add(lines).min(last);
        }
        TabId::Setup => {
            let last = view_state.team_names.len().saturating_sub(1);
            view_state.selected_team = view_state.selected_team.saturating_add(lines).min(last);
        }
        TabId::DraftBoard | TabId::MyTeam => {
            let key = active_widget_key(view_state);
            let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
            *offset = offset.saturating_add(lines);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
