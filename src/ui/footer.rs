use crate::ui::app::{Pane, PopupKind};
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Key hints for the current focus plus the crate version.
pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, area: Rect, pane: Pane, popup: Option<PopupKind>) -> Paragraph<'static> {
        let hints = hints_for(pane, popup);
        let version = format!("v{} ", VERSION);

        // Calculate padding using char count, not byte count (for Unicode)
        let hints_width = hints.chars().count();
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize; // minus borders
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(version_width);

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}

fn hints_for(pane: Pane, popup: Option<PopupKind>) -> &'static str {
    match (popup, pane) {
        (Some(PopupKind::Checkout), _) => " Enter/y: Confirm │ Esc: Close",
        (Some(PopupKind::ConfirmReset), _) => " y: Reset everything │ n/Esc: Cancel",
        (None, Pane::Catalog) => {
            " ↑↓: Browse │ Enter: Add │ d: Remove │ Tab: Cart │ c: Checkout │ r: Reset │ q: Quit"
        }
        (None, Pane::Cart) => " ↑↓: Browse │ d: Remove │ Tab: Catalog │ c: Checkout │ q: Quit",
    }
}
