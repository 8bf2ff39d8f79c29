// Draft board widget: every completed pick, in pick order.
//
// Columns: Round, Pick, Drafter, Player, Pos, Team. Picks made by my team
// are highlighted. Scrollable with j/k.

use ratatui::layout::{Constraint, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
};
use ratatui::Frame;

use crate::draft::pick::DraftPick;
use crate::tui::ViewState;

/// Render the draft board into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    if state.draft_board.is_empty() {
        let paragraph = Paragraph::new("  No picks yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Draft Board"));
        frame.render_widget(paragraph, area);
        return;
    }

    let scroll_offset = state.scroll_offset.get("draft_board").copied().unwrap_or(0);

    // Visible rows: subtract 2 for borders and 1 for the header
    let visible_rows = (area.height as usize).saturating_sub(3);
    let total = state.draft_board.len();

    let max_offset = total.saturating_sub(visible_rows);
    let scroll_offset = scroll_offset.min(max_offset);

    let header = Row::new(vec![
        Cell::from("Rd"),
        Cell::from("Pick"),
        Cell::from("Drafter"),
        Cell::from("Player"),
        Cell::from("Pos"),
        Cell::from("Team"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .draft_board
        .iter()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .map(|pick| {
            let style = if pick.drafter == state.my_team {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            Row::new(format_pick_cells(pick)).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(16),
        Constraint::Min(20),
        Constraint::Length(5),
        Constraint::Length(6),
    ];

    let title = format!("Draft Board ({} picks)", total);
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);

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

/// Cell text for one board row.
pub fn format_pick_cells(pick: &DraftPick) -> [String; 6] {
    [
        pick.round.to_string(),
        pick.pick_number.to_string(),
        pick.drafter.clone(),
        pick.name.clone(),
        pick.position.clone(),
        pick.team.clone(),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pick(pick_number: u32, round: u32, drafter: &str, name: &str) -> DraftPick {
        DraftPick {
            round,
            pick_number,
            drafter: drafter.to_string(),
            name: name.to_string(),
            position: "WR".to_string(),
            team: "MIN".to_string(),
        }
    }

    #[test]
    fn format_pick_cells_order() {
        let pick = make_pick(12, 2, "Team 9", "Justin Jefferson");
        assert_eq!(
            format_pick_cells(&pick),
            ["2", "12", "Team 9", "Justin Jefferson", "WR", "MIN"].map(String::from)
        );
    }

    #[test]
    fn render_does_not_panic_empty() {
        let backend = ratatui::backend::TestBackend::new(80, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_with_overflow_and_scroll() {
        let backend = ratatui::backend::TestBackend::new(80, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.my_team = "You".into();
        state.draft_board = (1..=30)
            .map(|n| make_pick(n, (n - 1) / 10 + 1, if n % 2 == 0 { "You" } else { "Rival" }, "P"))
            .collect();
        state.scroll_offset.insert("draft_board".into(), 500);
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
