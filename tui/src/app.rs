//! Interactive host: one UI task multiplexing terminal input, app events and
//! the spinner tick.

use crossterm::event::Event;
use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use tracing::info;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::config::Config;
use crate::fetch::source_from_settings;
use crate::screen::ListingsScreen;
use crate::screen::ScreenAction;
use crate::style::style_for;
use crate::tui::TerminalSession;

pub async fn run_app(config: &Config) -> color_eyre::Result<()> {
    let mut session = TerminalSession::enter()?;
    let (app_event_tx, mut app_event_rx) = unbounded_channel();
    let app_event_tx = AppEventSender::new(app_event_tx);

    // Raw mode turns ctrl + c into a key event; this only fires for signals
    // sent from outside the terminal.
    let signal_tx = app_event_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_tx.send(AppEvent::ExitRequest);
        }
    });

    let mut screen = ListingsScreen::new(style_for(config.platform));
    screen.mount(source_from_settings(&config.client), app_event_tx);

    let mut ticker = tokio::time::interval(config.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut terminal_events = EventStream::new().fuse();

    session
        .terminal_mut()
        .draw(|frame| screen.render(frame.area(), frame.buffer_mut()))?;

    loop {
        tokio::select! {
            Some(event) = terminal_events.next() => {
                match event? {
                    Event::Key(key) => match screen.handle_key(key) {
                        ScreenAction::Quit => break,
                        ScreenAction::Redraw => {}
                        ScreenAction::None => continue,
                    },
                    Event::Resize(..) => {}
                    _ => continue,
                }
            }
            Some(event) = app_event_rx.recv() => {
                match event {
                    AppEvent::ListingsFetched { attempt, outcome } => {
                        if !screen.on_listings_fetched(attempt, outcome) {
                            continue;
                        }
                        debug!(state = screen.state().label(), "listings screen updated");
                    }
                    AppEvent::ExitRequest => break,
                }
            }
            _ = ticker.tick() => {
                if !screen.tick() {
                    continue;
                }
            }
            else => break,
        }

        session
            .terminal_mut()
            .draw(|frame| screen.render(frame.area(), frame.buffer_mut()))?;
    }

    screen.unmount();
    info!("listings screen closed");
    Ok(())
}
