/// Binary entry point shared by both dashboards
use std::{error::Error, fs::OpenOptions, io, path::Path, sync::Mutex, thread, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use super::config::{DashboardConfig, Mode};
use super::controller::Dashboard;
use super::fetcher::HttpFetcher;

const KEY_POLL: Duration = Duration::from_millis(250);

/// Load config from the environment and refresh until the user quits
///
/// `q`, `Esc` and `Ctrl-C` quit; so does SIGINT from outside the terminal.
pub async fn run(mode: Mode) -> Result<(), Box<dyn Error>> {
    let config = DashboardConfig::from_env(mode)?;
    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }

    info!(
        "Starting {:?} dashboard: endpoint={} interval={:?} timeout={:?} window={}",
        config.mode, config.endpoint, config.interval, config.timeout, config.window_size
    );

    // Setup panic hook to restore terminal on crash
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    if let Err(e) = setup_terminal() {
        let _ = restore_terminal();
        return Err(e.into());
    }

    let result = draw_until_quit(config).await;
    let restored = restore_terminal();

    if let Err(e) = &result {
        error!("Dashboard stopped on terminal error: {}", e);
    }
    result?;
    Ok(restored?)
}

fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)
}

/// Best effort: always attempts both steps, reports the first failure
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    raw.and(screen)
}

async fn draw_until_quit(config: DashboardConfig) -> io::Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let quit = spawn_key_listener();
    let shutdown = async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => info!("Interrupted"),
            _ = quit_pressed(quit) => info!("Quit key pressed"),
        }
    };

    let fetcher = HttpFetcher::new(config.endpoint.clone(), config.timeout);
    let mut dashboard = Dashboard::new(config, fetcher);
    dashboard.run(&mut terminal, shutdown).await
}

/// Watch the keyboard on a plain thread until a quit key is pressed
///
/// Raw mode swallows the Ctrl-C signal, so it arrives here as a key.
fn spawn_key_listener() -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();

    thread::spawn(move || {
        while !tx.is_closed() {
            match next_key(KEY_POLL) {
                Ok(Some((code, modifiers))) if is_quit_key(code, modifiers) => {
                    let _ = tx.send(());
                    return;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Keyboard input unavailable: {}", e);
                    return;
                }
            }
        }
    });

    rx
}

fn next_key(timeout: Duration) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some((key.code, key.modifiers))),
        _ => Ok(None),
    }
}

async fn quit_pressed(rx: oneshot::Receiver<()>) {
    // listener gone without a key press: keep running until SIGINT
    if rx.await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn is_quit_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Log to `path`; stdout belongs to the dashboard
fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| e as Box<dyn Error>)
}
