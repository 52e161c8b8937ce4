//! Swifter TUI Entry Point
//!
//! Launches the terminal dashboard.
//!
//! Usage:
//!   swifter-tui [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>      Config file (default: ~/.config/swifter/dashboard.toml)
//!   --variant <VARIANT>      Mascot variant: classic or enhanced
//!   --seed <N>               Fixed random seed
//!   --session <PATH>         Session file location
//!
//! Logs go to `~/.local/share/swifter/swifter-tui.log` because the
//! terminal belongs to the UI. Set `RUST_LOG` to change the level.

use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swifter_core::{default_config_path, load_config_from_path, ConfigOverrides, Variant};
use swifter_tui::App;

/// Swifter terminal dashboard
#[derive(Parser, Debug)]
#[command(name = "swifter-tui", version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long, env = "SWIFTER_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Mascot variant (classic or enhanced)
    #[arg(long, value_name = "VARIANT")]
    variant: Option<Variant>,

    /// Fixed random seed for the mascot and mock pipeline
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Session file location
    #[arg(long, value_name = "PATH")]
    session: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging();

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: swifter-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        std::process::exit(1);
    }

    let mut config = load_config_from_path(args.config.clone().or_else(default_config_path))?;
    config.apply_overrides(&ConfigOverrides {
        variant: args.variant,
        seed: args.seed,
        session_path: args.session,
    });

    let mut app = App::new(&config).await?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = app.run(&mut terminal).await;
    let username = app.username().map(ToString::to_string);
    app.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Some(name) = username {
        println!("\n\x1b[35mSwifter:\x1b[0m See you soon, {name}!\n");
    }

    result
}

/// Log to a file in the data dir; without one, log nothing
fn init_logging() {
    let Some(dir) = dirs::data_dir().map(|d| d.join("swifter")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("swifter-tui.log")) else {
        return;
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .with(filter)
        .init();
}
