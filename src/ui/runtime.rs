use crate::store::Store;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

/// Run the interactive storefront until the user quits.
pub fn run(store: Store, tick_rate: Duration, checkout_delay: Duration) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new(store, checkout_delay);
    let events = EventHandler::new(tick_rate);
    tracing::info!(?tick_rate, ?checkout_delay, "Storefront started");

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) => app.on_tick(Instant::now()),
            // Next draw picks up the new size
            Ok(AppEvent::Resize(cols, rows)) => tracing::debug!(cols, rows, "Terminal resized"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(events);
    drop(guard);
    tracing::info!("Storefront closed");
    Ok(())
}
