// Status bar widget: tabs, who is on the clock, last sync, last error.

use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::draft::PickAttribution;
use crate::protocol::TabId;
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [tab bar] | [on the clock] | [sync time] | [error or notice]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = tab_spans(state.active_tab);

    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    let clock_style = match &state.on_the_clock {
        Some(p) if p.drafter == state.my_team => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::White),
    };
    spans.push(Span::styled(
        on_the_clock_text(state.on_the_clock.as_ref()),
        clock_style,
    ));

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        sync_text(state.last_synced),
        Style::default().fg(Color::Gray),
    ));

    if let Some(err) = &state.last_error {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!("! {err}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    } else if let Some(notice) = &state.notice {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(notice.clone(), Style::default().fg(Color::Green)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "Rd 2, Pick 14: Team 7 on the clock", or a hint when there is no order.
pub fn on_the_clock_text(pick: Option<&PickAttribution>) -> String {
    match pick {
        Some(p) => format!(
            "Rd {}, Pick {}: {} on the clock",
            p.round, p.pick_number, p.drafter
        ),
        None => "No draft order".to_string(),
    }
}

pub fn sync_text(last_synced: Option<DateTime<Local>>) -> String {
    match last_synced {
        Some(t) => format!("Synced {}", t.format("%H:%M:%S")),
        None => "Not synced".to_string(),
    }
}

/// Build tab indicator spans with the active tab highlighted.
/// E.g. "[1:Available] [2:Draft Board] [3:My Team] [4:Setup] "
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, tab_id) in TabId::ALL.into_iter().enumerate() {
        let style = if tab_id == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", i + 1, tab_id.title()), style));
        spans.push(Span::raw(" "));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
