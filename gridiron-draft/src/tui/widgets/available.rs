// Available players widget: searchable table of undrafted players.
//
// Recommendation banner on top (only when the backend suggested someone),
// then Name, Pos, Team, Proj. Filtered by position_filter and filter_text.
// The cursor row is the player Enter drafts.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::api::Recommendation;
use crate::draft::pick::{Player, Position};
use crate::tui::ViewState;

/// Render the recommendation banner and the available players table.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let table_area = match &state.recommendation {
        Some(rec) => {
            let [banner, rest] =
                Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);
            render_recommendation(frame, banner, rec);
            rest
        }
        None => area,
    };

    let filtered = state.filtered_players();

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Name"),
        Cell::from("Pos"),
        Cell::from("Team"),
        Cell::from("Proj"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = filtered
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(p.name.clone()),
                Cell::from(format_position(p)),
                Cell::from(p.team.clone()),
                Cell::from(format!("{:.1}", p.projected_points)),
            ])
        })
        .collect();

    let title = build_title(state, filtered.len());

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut table_state =
        TableState::default().with_selected((!filtered.is_empty()).then_some(state.selected_player));
    frame.render_stateful_widget(table, table_area, &mut table_state);
}

fn render_recommendation(frame: &mut Frame, area: Rect, rec: &Recommendation) {
    let mut spans = vec![Span::styled(
        rec.headline(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(points) = rec.projected_points {
        spans.push(Span::raw(format!("  Projected Points: {points:.1}")));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title("Recommended"),
    );
    frame.render_widget(paragraph, area);
}

/// Filter players by position and a case-insensitive name search.
pub fn filter_players<'a>(
    players: &'a [Player],
    position_filter: Option<Position>,
    filter_text: &str,
) -> Vec<&'a Player> {
    let text_lower = filter_text.to_lowercase();

    players
        .iter()
        .filter(|p| {
            if let Some(pos) = position_filter {
                if p.position() != Some(pos) {
                    return false;
                }
            }
            text_lower.is_empty() || p.name.to_lowercase().contains(&text_lower)
        })
        .collect()
}

/// Normalized position label, falling back to the raw string.
pub fn format_position(player: &Player) -> String {
    match player.position() {
        Some(pos) => pos.display_str().to_string(),
        None if player.position.is_empty() => "--".to_string(),
        None => player.position.clone(),
    }
}

/// Build the title with filter info and pre-computed count.
fn build_title(state: &ViewState, filtered_count: usize) -> Line<'static> {
    let mut title = String::from("Available Players");
    match state.position_filter {
        Some(pos) => title.push_str(&format!(" [{}]", pos.display_str())),
        None => title.push_str(" [All]"),
    }
    if !state.filter_text.is_empty() || state.filter_mode {
        title.push_str(&format!(" \"{}\"", state.filter_text));
    }
    title.push_str(&format!(" ({})", filtered_count));
    Line::from(title)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
