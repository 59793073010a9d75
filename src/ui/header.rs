use crate::store::Store;
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK, STATUS_WARN,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Balance and cart summary bar.
pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, store: &Store) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let total_style = if store.can_afford_cart() {
            text_style
        } else {
            Style::default().fg(STATUS_ERROR)
        };

        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled(
                "StyleCart",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled("💰 ", text_style),
            Span::styled(
                format!("{} credits", store.credits()),
                Style::default().fg(STATUS_OK),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(
                format!("🛒 {} in cart", store.cart_item_count()),
                text_style,
            ),
            Span::styled(" · ", separator_style),
            Span::styled(format!("{} credits", store.cart_total()), total_style),
            Span::styled("  │  ", separator_style),
            Span::styled(
                format!("{} owned", store.purchased_count()),
                text_style,
            ),
        ];
        if store.is_loading() {
            spans.push(Span::styled("  │  ", separator_style));
            spans.push(Span::styled("Processing...", Style::default().fg(STATUS_WARN)));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
