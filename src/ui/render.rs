use crate::catalog::TemplateDescriptor;
use crate::store::{NoticeLevel, Store};
use crate::ui::app::{App, Pane, PopupKind};
use crate::ui::checkout::{price_label, render_checkout_dialog};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{body_columns, centered_rect_by_size, layout_regions, toast_rect};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, POPUP_BORDER,
    STATUS_ERROR, STATUS_INFO, STATUS_OK, STATUS_WARN,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const TOAST_WIDTH: u16 = 48;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    frame.render_widget(Header::new().widget(app.store()), header);
    frame.render_widget(Clear, body);

    let (list_area, detail_area, cart_area) = body_columns(body);
    draw_catalog(frame, app, list_area);
    draw_detail(frame, app, detail_area);
    draw_cart(frame, app, cart_area);

    frame.render_widget(
        Footer::new().widget(footer, app.pane(), app.popup_kind()),
        footer,
    );

    match app.popup_kind() {
        Some(PopupKind::Checkout) => render_checkout_dialog(frame, app.checkout_dialog()),
        Some(PopupKind::ConfirmReset) => draw_reset_confirm(frame, app.store(), body),
        None => {}
    }

    draw_toasts(frame, app, body);
}

fn pane_block(title: &'static str, focused: bool) -> Block<'static> {
    let border = if focused { ACCENT } else { GLOBAL_BORDER };
    Block::default()
        .title(Span::styled(title, Style::default().fg(HEADER_TEXT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

/// First row to draw so that `selection` stays inside `height` rows.
fn scroll_offset(selection: usize, height: u16) -> u16 {
    let height = height.max(1) as usize;
    selection.saturating_sub(height - 1) as u16
}

fn draw_catalog(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let store = app.store();
    let focused = app.pane() == Pane::Catalog && !app.show_popup();
    let block = pane_block(" Templates ", focused);
    let inner_height = block.inner(area).height;

    let name_width = store
        .templates()
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = store
        .templates()
        .iter()
        .enumerate()
        .map(|(idx, template)| {
            let (marker, marker_color) = if store.is_purchased(template.id) {
                ("✓", STATUS_OK)
            } else if store.in_cart(template.id) {
                ("•", ACCENT)
            } else {
                (" ", HEADER_TEXT)
            };
            let mut line = Line::from(vec![
                Span::styled(format!(" {marker} "), Style::default().fg(marker_color)),
                Span::styled(
                    format!("{:<width$}", template.name, width = name_width),
                    Style::default().fg(HEADER_TEXT),
                ),
                Span::styled(
                    format!("  {:>8}", price_label(template.cost)),
                    Style::default().fg(HEADER_SEPARATOR),
                ),
            ]);
            if idx == app.catalog_selection() {
                line = line.style(Style::default().bg(ACTIVE_HIGHLIGHT));
            }
            line
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(block)
        .scroll((scroll_offset(app.catalog_selection(), inner_height), 0));
    frame.render_widget(widget, area);
}

fn accent_color(template: &TemplateDescriptor) -> Color {
    template
        .accent
        .as_deref()
        .and_then(|accent| accent.parse::<Color>().ok())
        .unwrap_or(ACCENT)
}

fn draw_detail(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = pane_block(" Details ", false);
    let Some(template) = app.selected_template() else {
        frame.render_widget(block, area);
        return;
    };
    let store = app.store();
    let text = Style::default().fg(HEADER_TEXT);
    let dim = Style::default().fg(HEADER_SEPARATOR);

    let (status, status_color) = if store.is_purchased(template.id) {
        ("Owned".to_string(), STATUS_OK)
    } else if store.in_cart(template.id) {
        ("In cart".to_string(), ACCENT)
    } else if template.cost > store.credits() {
        (
            format!("Need {} more credits", template.cost - store.credits()),
            STATUS_ERROR,
        )
    } else {
        ("Available".to_string(), HEADER_TEXT)
    };

    let filled = (template.popularity as usize).min(100) / 10;
    let popularity = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled));

    let mut lines = vec![
        Line::from(Span::styled(
            template.name.clone(),
            text.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(template.tag.clone(), dim)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Price: ", dim),
            Span::styled(price_label(template.cost), text),
        ]),
        Line::from(vec![
            Span::styled("Popularity: ", dim),
            Span::styled(popularity, Style::default().fg(ACCENT)),
            Span::styled(format!(" {}%", template.popularity), text),
        ]),
        Line::from(vec![
            Span::styled("Use cases: ", dim),
            Span::styled(template.use_cases.join(", "), text),
        ]),
        Line::from(vec![
            Span::styled("Status: ", dim),
            Span::styled(status, Style::default().fg(status_color)),
        ]),
        Line::from(""),
    ];
    lines.push(Line::from(Span::styled(
        template.demo_text.clone(),
        Style::default()
            .fg(accent_color(template))
            .add_modifier(Modifier::BOLD),
    )));

    let widget = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn draw_cart(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let store = app.store();
    let focused = app.pane() == Pane::Cart && !app.show_popup();
    let block = pane_block(" Cart ", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);

    let text = Style::default().fg(HEADER_TEXT);
    let dim = Style::default().fg(HEADER_SEPARATOR);

    let items: Vec<Line> = if store.cart().is_empty() {
        vec![Line::from(Span::styled(" Your cart is empty", dim))]
    } else {
        store
            .cart()
            .iter()
            .enumerate()
            .map(|(idx, template)| {
                let mut line = Line::from(vec![
                    Span::styled(format!(" {}", template.name), text),
                    Span::styled(format!("  {}", price_label(template.cost)), dim),
                ]);
                if focused && idx == app.cart_selection() {
                    line = line.style(Style::default().bg(ACTIVE_HIGHLIGHT));
                }
                line
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(items).scroll((scroll_offset(app.cart_selection(), sections[0].height), 0)),
        sections[0],
    );

    let balance_line = if store.can_afford_cart() {
        Line::from(vec![
            Span::styled(" After purchase: ", dim),
            Span::styled(
                format!("{} credits", store.credits() - store.cart_total()),
                Style::default().fg(STATUS_OK),
            ),
        ])
    } else {
        Line::from(Span::styled(
            format!(
                " Need {} more credits",
                store.cart_total() - store.credits()
            ),
            Style::default().fg(STATUS_ERROR),
        ))
    };
    let summary = vec![
        Line::from(Span::styled("─".repeat(inner.width as usize), dim)),
        Line::from(vec![
            Span::styled(" Total: ", dim),
            Span::styled(
                format!("{} credits", store.cart_total()),
                text.add_modifier(Modifier::BOLD),
            ),
        ]),
        balance_line,
    ];
    frame.render_widget(Paragraph::new(summary), sections[1]);
}

fn draw_reset_confirm(frame: &mut Frame<'_>, store: &Store, body: Rect) {
    let text = Style::default().fg(HEADER_TEXT);
    let lines = vec![
        Line::from(Span::styled(
            format!(
                " Forget {} purchased template(s) and restore {} credits?",
                store.purchased_count(),
                store.starting_credits()
            ),
            text,
        )),
        Line::from(Span::styled(" The cart is emptied too.", text)),
        Line::from(""),
        Line::from(Span::styled(
            " y: Reset   n/Esc: Cancel",
            Style::default().fg(HEADER_SEPARATOR),
        )),
    ];

    let width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let area = centered_rect_by_size(body, width.saturating_add(4), lines.len() as u16 + 2);
    frame.render_widget(Clear, area);
    let popup = Block::default()
        .title(Span::styled(" Reset store ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(popup), area);
}

fn toast_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Success => STATUS_OK,
        NoticeLevel::Info => STATUS_INFO,
        NoticeLevel::Warning => STATUS_WARN,
        NoticeLevel::Error => STATUS_ERROR,
    }
}

fn draw_toasts(frame: &mut Frame<'_>, app: &App, body: Rect) {
    if app.toasts().is_empty() {
        return;
    }
    let area = toast_rect(body, TOAST_WIDTH, app.toasts().len() as u16);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(app.toasts().iter().map(|_| Constraint::Length(3)))
        .split(area);

    for (toast, row) in app.toasts().iter().zip(rows.iter()) {
        let color = toast_color(toast.notice.level);
        frame.render_widget(Clear, *row);
        let widget = Paragraph::new(Line::from(Span::styled(
            toast.notice.message.clone(),
            Style::default().fg(HEADER_TEXT),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(widget, *row);
    }
}
