//! Taskpad terminal client
//!
//! Entry point: configuration, logging, terminal lifecycle and the event
//! loop wiring key presses and network completions into the [`App`].

mod app;
mod net;
mod ui;

use std::fs::File;
use std::io;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tp_core::api::ApiClient;

use crate::app::{App, Effect};
use crate::net::Dispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let base_url = std::env::var("TASKPAD_API_URL")
        .unwrap_or_else(|_| "http://localhost:3000/api".to_string());
    tracing::info!(%base_url, "starting taskpad");

    let client = ApiClient::new(base_url);

    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, client).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Logs go to a file because the terminal itself is in raw mode.
fn init_tracing() -> anyhow::Result<()> {
    let path = std::env::var("TASKPAD_LOG").unwrap_or_else(|_| "taskpad.log".to_string());
    let file =
        File::create(&path).with_context(|| format!("failed to open log file {path}"))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tp_tui=info,tp_core=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

/// Restore the terminal before the default panic output, so the message is
/// readable instead of being swallowed by the alternate screen.
fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        hook(info);
    }));
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: ApiClient,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(client, tx);

    let mut app = App::new();
    dispatcher.dispatch(Effect::CheckSession);

    let mut events = EventStream::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        let effects = tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key)
                }
                Some(Ok(_)) => Vec::new(),
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            Some(event) = rx.recv() => app.handle_event(event),
        };

        for effect in effects {
            dispatcher.dispatch(effect);
        }
    }

    Ok(())
}
