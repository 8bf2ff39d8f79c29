// Roster widget: my team laid out into starting slots and bench.
//
// "QB: Josh Allen (BUF) 390.2" or "FLEX: Empty", then "BENCH 1: ..." rows.
// Scrollable with j/k when the bench overflows.

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::draft::pick::Player;
use crate::draft::roster::{RosterSlots, SLOT_COUNT};
use crate::tui::ViewState;

/// Render my roster into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = roster_lines(&state.my_roster);

    let scroll_offset = state.scroll_offset.get("roster").copied().unwrap_or(0);
    let visible_rows = (area.height as usize).saturating_sub(2);
    let total = lines.len();
    let max_offset = total.saturating_sub(visible_rows);
    let scroll_offset = scroll_offset.min(max_offset);

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .map(|(text, filled)| {
            let style = if filled {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    let title = format!(
        "{} ({}/{} starters, {:.1} pts)",
        if state.my_team.is_empty() { "My Team" } else { state.my_team.as_str() },
        state.my_roster.filled_count(),
        SLOT_COUNT,
        state.my_roster.starter_points()
    );

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);

    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_rows)).position(scroll_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// Display rows for a roster: each starting slot, then each bench player.
/// The flag marks rows that hold a player.
pub fn roster_lines(roster: &RosterSlots) -> Vec<(String, bool)> {
    let starters = roster.slots.iter().map(|slot| {
        let label = slot.label.display_str();
        match &slot.player {
            Some(p) => (format!(" {}: {}", label, format_player(p)), true),
            None => (format!(" {}: Empty", label), false),
        }
    });
    let bench = roster
        .bench
        .iter()
        .enumerate()
        .map(|(i, p)| (format!(" BENCH {}: {}", i + 1, format_player(p)), true));
    starters.chain(bench).collect()
}

fn format_player(player: &Player) -> String {
    if player.team.is_empty() {
        format!("{} {:.1}", player.name, player.projected_points)
    } else {
        format!("{} ({}) {:.1}", player.name, player.team, player.projected_points)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
