//! `practice`: terminal client for the practice HR back-end.
//!
//! # Usage
//!
//! ```
//! practice --url http://localhost:8080 --user admin --password admin
//! practice --config ~/.config/practice/config.toml
//! ```
//!
//! Logs go to a file (`practice.log` by default) since the terminal is
//! owned by the UI. Filter them with `RUST_LOG`.

use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use practice_cli::{
  ApiClient,
  app::App,
  settings::{Overrides, Settings},
  ui,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "practice", version, about = "Terminal client for the practice HR API")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the server (default: http://localhost:8080).
  #[arg(long, env = "PRACTICE_URL")]
  url: Option<String>,

  /// Login name.
  #[arg(long, env = "PRACTICE_USER")]
  user: Option<String>,

  #[arg(long, env = "PRACTICE_PASSWORD")]
  password: Option<String>,

  /// Request timeout in seconds.
  #[arg(long)]
  timeout_secs: Option<u64>,

  /// Where to write logs.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let settings = Settings::load(args.config.as_ref(), Overrides {
    url:          args.url,
    username:     args.user,
    password:     args.password,
    timeout_secs: args.timeout_secs,
    log_file:     args.log_file,
  })?;

  // Initialise tracing.
  let log_file = File::create(&settings.log_file)
    .with_context(|| format!("opening log file {}", settings.log_file.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(log_file))
    .with_ansi(false)
    .init();

  info!(url = %settings.url, user = %settings.username, "starting");

  let client = ApiClient::login(settings.api_config())
    .await
    .context("signing in")?;
  let mut app = App::new(client).with_page_size(settings.page_size);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  info!("exiting");
  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event {
      if !app.handle_key(key).await? {
        break;
      }
    }
  }

  Ok(())
}
