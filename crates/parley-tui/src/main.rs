use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parley_core::{
    client::{Generator, OllamaClient},
    settings::{project_dirs, Settings},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;
mod ui;
use ui::app::App;

const LOG_FILE: &str = "parley.log";

#[tokio::main]
async fn main() -> Result<()> {
    let log_path = init_logging()?;
    tracing::info!(log = %log_path.display(), "parley starting");

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Warning: Failed to load settings: {}. Using defaults.", e);
            tracing::warn!(error = %e, "falling back to default settings");
            Settings::default()
        }
    };
    let generator: Arc<dyn Generator> = Arc::new(OllamaClient::new(&settings)?);

    let mut terminal = init_terminal()?;
    let mut app = App::new(settings, generator);

    let result = app.run(&mut terminal).await;

    restore_terminal(&mut terminal)?;
    tracing::info!("parley stopped");

    result
}

/// Logs go to a file; stdout belongs to the terminal UI.
fn init_logging() -> Result<PathBuf> {
    let dir = project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
