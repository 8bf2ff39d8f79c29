// Screen layout: panel arrangement and the help bar.
//
// +--------------------------------------------------+
// | Status Bar (1 row): tabs, on the clock, sync      |
// +--------------------------------------------------+
// |                                                  |
// | Main Panel (fill): active tab                    |
// |                                                  |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::TabId;
use crate::tui::ViewState;

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    /// Tab-switched content area.
    pub main_panel: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(5),    // main panel
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        main_panel: vertical[1],
        help_bar: vertical[2],
    }
}

/// Keyboard hints for the current mode and tab.
pub fn help_text(state: &ViewState) -> &'static str {
    if state.rename_buffer.is_some() {
        return " Type new name | Enter:Save | Esc:Cancel";
    }
    if state.filter_mode {
        return " Type to search | Enter:Keep | Esc:Clear";
    }
    match state.active_tab {
        TabId::Available => {
            " j/k:Move | Enter:Draft | /:Search | p:Position | Esc:Clear | g:Recommend | r:Refresh | R:Reset | 1-4:Tabs | q:Quit"
        }
        TabId::Setup => {
            " j/k:Move | e:Rename | K/J:Reorder | *:My team | s:Start draft | 1-4:Tabs | q:Quit"
        }
        TabId::DraftBoard | TabId::MyTeam => {
            " j/k:Scroll | r:Refresh | g:Recommend | R:Reset | 1-4:Tabs | q:Quit"
        }
    }
}

pub fn render_help_bar(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
