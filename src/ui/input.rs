use crate::ui::app::{App, Pane, PopupKind};
use crate::ui::checkout::CheckoutDialogState;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    handle_key_at(app, key, Instant::now());
}

/// Key dispatch with an explicit clock.
pub fn handle_key_at(app: &mut App, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    if let Some(kind) = app.popup_kind() {
        match (kind, key.code) {
            (_, KeyCode::Esc) => app.close_popup(),
            (PopupKind::Checkout, KeyCode::Enter | KeyCode::Char('y')) => {
                if matches!(app.checkout_dialog(), CheckoutDialogState::Review { .. }) {
                    app.confirm_checkout(now);
                } else {
                    app.close_popup();
                }
            }
            (PopupKind::ConfirmReset, KeyCode::Enter | KeyCode::Char('y')) => {
                app.confirm_reset(now);
            }
            (PopupKind::ConfirmReset, KeyCode::Char('n')) => app.close_popup(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-5),
        KeyCode::PageDown => app.move_selection(5),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_pane(),
        KeyCode::Enter | KeyCode::Char('a') if app.pane() == Pane::Catalog => {
            app.add_selected(now)
        }
        KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => app.remove_selected(now),
        KeyCode::Char('c') => app.open_checkout(now),
        KeyCode::Char('r') => app.open_reset_confirm(now),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
