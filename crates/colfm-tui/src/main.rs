mod app;
mod icons;
mod image_preview;
mod input;
mod render;
mod ui;
mod views;

use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use colfm_core::config::settings::config_dir;
use colfm_core::{Config, CoreError, Keymap};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::image_preview::ImagePreviewState;
use crate::input::handle_key;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs to a file so output never lands on the terminal.
fn init_tracing() -> anyhow::Result<()> {
    let path = std::env::var_os("COLFM_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("colfm.log"));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(())
}

fn load_keymap(dir: Option<&Path>) -> Keymap {
    let Some(dir) = dir else {
        return Keymap::default();
    };
    let path = dir.join("keymap.toml");
    match Keymap::load(&path) {
        Ok(keymap) => keymap,
        Err(CoreError::NotFound(_)) => Keymap::default(),
        Err(e) => {
            tracing::warn!("keymap: using defaults, {}: {e}", path.display());
            Keymap::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cwd = std::env::current_dir()?;
    let config_dir = config_dir(&cwd);
    let config = config_dir
        .as_deref()
        .map(|dir| Config::load_or_default(&dir.join("config.toml")))
        .unwrap_or_default();
    let keymap = load_keymap(config_dir.as_deref());

    let start_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd.clone());
    tracing::info!("colfm: starting in {}", start_dir.display());

    let mut app = App::new(&start_dir, &config, keymap)?;

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut images = ImagePreviewState::detect();

    let result = run_app(&mut terminal, &mut app, &mut images);

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    images: &mut ImagePreviewState,
) -> anyhow::Result<()> {
    loop {
        app.expire_status(Instant::now());
        terminal.draw(|f| render::render(f, app, images))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = handle_key(key, app.mode(), app.keymap());
                    app.handle_input(action);
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    app.handle_mouse(mouse, Rect::new(0, 0, size.width, size.height));
                }
                _ => {}
            }
        }

        if app.should_quit() {
            tracing::info!("colfm: quit");
            return Ok(());
        }
    }
}
