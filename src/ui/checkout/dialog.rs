//! Rendering for the checkout overlay.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::ui::layout::centered_rect_by_size;
use crate::ui::theme::{
    ACCENT, HEADER_SEPARATOR, HEADER_TEXT, POPUP_BORDER, STATUS_ERROR, STATUS_OK,
};

use super::state::{CheckoutDialogState, CheckoutLine, CheckoutSummary};

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const DIALOG_WIDTH: u16 = 52;

pub fn render_checkout_dialog(frame: &mut Frame, state: &CheckoutDialogState) {
    let lines = match state {
        CheckoutDialogState::Hidden => return,
        CheckoutDialogState::Review {
            lines,
            total,
            credits,
        } => review_lines(lines, *total, *credits),
        CheckoutDialogState::Processing {
            lines,
            total,
            animation_tick,
        } => processing_lines(lines.len(), *total, *animation_tick),
        CheckoutDialogState::Success { summary } => success_lines(summary),
        CheckoutDialogState::Failed { message } => failed_lines(message),
    };

    // borders + progress bar + spacer
    let height = (lines.len() as u16).saturating_add(4);
    let area = centered_rect_by_size(frame.area(), DIALOG_WIDTH, height);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(state.title(), Style::default().fg(ACCENT)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let gauge_color = match state {
        CheckoutDialogState::Failed { .. } => STATUS_ERROR,
        _ => STATUS_OK,
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(gauge_color))
        .percent(state.progress())
        .label("");
    frame.render_widget(gauge, chunks[0]);
    frame.render_widget(Paragraph::new(lines), chunks[2]);
}

fn review_lines(items: &[CheckoutLine], total: u64, credits: u64) -> Vec<Line<'static>> {
    let text = Style::default().fg(HEADER_TEXT);
    let dim = Style::default().fg(HEADER_SEPARATOR);
    let inner_width = DIALOG_WIDTH.saturating_sub(2) as usize;

    let mut lines = vec![Line::from(Span::styled(
        format!(
            "  {} template{} ready for purchase",
            items.len(),
            if items.len() == 1 { "" } else { "s" }
        ),
        dim,
    ))];
    lines.push(Line::from(""));

    for item in items {
        let price = price_label(item.cost);
        let label = if item.tag.is_empty() {
            item.name.clone()
        } else {
            format!("{} ({})", item.name, item.tag)
        };
        let padding = inner_width
            .saturating_sub(label.chars().count())
            .saturating_sub(price.chars().count())
            .saturating_sub(4);
        lines.push(Line::from(vec![
            Span::styled(format!("  {label}"), text),
            Span::raw(" ".repeat(padding.max(1))),
            Span::styled(price, text),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Total: ", text.add_modifier(Modifier::BOLD)),
        Span::styled(format!("{total} credits"), text),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Balance: ", text),
        Span::styled(format!("{credits} credits"), text),
    ]));

    if total <= credits {
        lines.push(Line::from(vec![
            Span::styled("  After purchase: ", text),
            Span::styled(
                format!("{} credits", credits - total),
                Style::default().fg(STATUS_OK),
            ),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Enter/y: Confirm   Esc: Cancel", dim)));
    } else {
        lines.push(Line::from(Span::styled(
            format!("  Insufficient credits! You need {} more.", total - credits),
            Style::default().fg(STATUS_ERROR),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Esc: Back to cart", dim)));
    }
    lines
}

fn processing_lines(count: usize, total: u64, animation_tick: u8) -> Vec<Line<'static>> {
    let spinner = SPINNER_FRAMES[(animation_tick as usize) % SPINNER_FRAMES.len()];
    vec![Line::from(vec![
        Span::styled(format!("  {} ", spinner), Style::default().fg(STATUS_OK)),
        Span::styled(
            format!("Purchasing {count} item(s) for {total} credits..."),
            Style::default().fg(HEADER_TEXT),
        ),
    ])]
}

fn success_lines(summary: &CheckoutSummary) -> Vec<Line<'static>> {
    let text = Style::default().fg(HEADER_TEXT);
    let short_id: String = summary.receipt_id.chars().take(8).collect();
    vec![
        Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(STATUS_OK)),
            Span::styled("Purchase successful!", text.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(format!("  {}", summary.names.join(", ")), text)),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "  Spent {} credits, {} remaining",
                summary.total, summary.remaining_credits
            ),
            text,
        )),
        Line::from(Span::styled(
            format!("  Receipt {short_id}"),
            Style::default().fg(HEADER_SEPARATOR),
        )),
    ]
}

fn failed_lines(message: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled("  ✗ ", Style::default().fg(STATUS_ERROR)),
            Span::styled(
                truncate(message, DIALOG_WIDTH as usize - 8),
                Style::default().fg(HEADER_TEXT),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Esc: Close",
            Style::default().fg(HEADER_SEPARATOR),
        )),
    ]
}

pub(crate) fn price_label(cost: u64) -> String {
    if cost == 0 {
        "Free".to_string()
    } else {
        format!("{cost} cr")
    }
}

fn truncate(message: &str, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        message.to_string()
    } else {
        let kept: String = message.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
