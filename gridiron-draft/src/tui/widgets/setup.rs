// Setup widget: the editable team list that becomes the draft order.
//
// "  1. You *" with the cursor row highlighted; while renaming, the cursor
// row shows the text being typed. Edits only take effect on `s`.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the setup list into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let uncommitted = state.team_names != state.draft_order;

    let items: Vec<ListItem> = state
        .team_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let editing = (i == state.selected_team)
                .then_some(state.rename_buffer.as_deref())
                .flatten();
            ListItem::new(team_line(i, name, name == &state.my_team, editing))
        })
        .collect();

    let title = if uncommitted {
        format!(
            "Draft Order Setup ({} teams, press s to apply)",
            state.team_names.len()
        )
    } else {
        format!("Draft Order Setup ({} teams)", state.team_names.len())
    };

    let border_style = if uncommitted {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut list_state = ListState::default()
        .with_selected((!state.team_names.is_empty()).then_some(state.selected_team));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn team_line(index: usize, name: &str, mine: bool, editing: Option<&str>) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("{:>3}. ", index + 1))];
    match editing {
        Some(buffer) => spans.push(Span::styled(
            format!("{buffer}_"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
        )),
        None => spans.push(Span::raw(name.to_string())),
    }
    if mine {
        spans.push(Span::styled(
            " *",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// Plain-text form of a setup row (for testing).
pub fn format_team_text(index: usize, name: &str, mine: bool) -> String {
    team_line(index, name, mine, None).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
