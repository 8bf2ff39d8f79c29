// Confirmation overlay widget.
//
// Renders a centered modal asking the user to confirm quitting or resetting
// the draft. Displayed on top of the main layout when `ViewState::confirm`
// is set.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::ConfirmAction;

const DIALOG_WIDTH: u16 = 40;
const DIALOG_HEIGHT: u16 = 5;

/// Title and question for each action.
pub fn prompt(action: ConfirmAction) -> (&'static str, &'static str) {
    match action {
        ConfirmAction::Quit => (" Quit? ", "Really quit?"),
        ConfirmAction::ResetDraft => (" Reset draft? ", "Delete every pick?"),
    }
}

/// Render the confirmation overlay centered on the screen.
pub fn render(frame: &mut Frame, area: Rect, action: ConfirmAction) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);

    // Clear the area behind the dialog so it renders cleanly on top
    frame.render_widget(Clear, dialog_area);

    let (title, question) = prompt(action);
    let accent = match action {
        ConfirmAction::Quit => Color::Yellow,
        ConfirmAction::ResetDraft => Color::Red,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));

    let text = Line::from(vec![
        Span::raw(format!("  {question} (")),
        Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw("/"),
        Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(")"),
    ]);

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().bg(Color::Black));

    frame.render_widget(paragraph, dialog_area);
}

/// Compute a centered rectangle of the given size within `area`, clamped to
/// the available space.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [centered] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(vertical);
    centered
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
