//! virtdash - live dashboard for a virtualization host
//!
//! Lists virtual machines, virtual networks and storage pools with their
//! run state and starts or stops them from the keyboard.
//!
//! ## Usage
//!
//! ```bash
//! # Local default hypervisor
//! virtdash
//!
//! # Explicit connection URI
//! virtdash -c qemu:///system
//!
//! # Show version
//! virtdash --version
//! ```
//!
//! Settings such as the poll interval live in `~/.virtdash/config.yaml`
//! (or the file named by `VIRTDASH_CONFIG`).

use std::io::Write;
use std::panic;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use virtdash_core::{DashConfig, DashError, LogGuard, init_logging};
use virtdash_source::VirshSource;
use virtdash_tui::App;

/// Terminal dashboard for virtual machines, networks and storage pools
#[derive(Parser, Debug)]
#[command(name = "virtdash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Hypervisor connection URI (e.g. qemu:///system)
    #[arg(short = 'c', long = "connect", value_name = "URI")]
    connect: Option<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => {
            info!("virtdash exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("virtdash error: {:#}", e);
            eprintln!("Error: {:#}", e);
            if let Some(guidance) = e.downcast_ref::<DashError>().and_then(DashError::guidance) {
                eprintln!("Hint: {}", guidance);
            }
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = DashConfig::load().context("Failed to load configuration")?;

    // Keep the guard alive until exit so buffered log lines are flushed.
    let _guard = setup_logging(&config);

    let uri = cli.connect.or_else(|| config.default_uri.clone());
    info!(uri = ?uri, poll_interval_ms = config.poll_interval_ms, "starting virtdash");

    let source = VirshSource::open(config.virsh_binary.clone(), uri)
        .context("Failed to open connection to the hypervisor")?;
    let mut app = App::initialize(source, config.poll_interval())
        .context("Failed to read resources from the hypervisor")?;

    // Install panic hook to ensure terminal cleanup
    install_panic_hook();

    app.run().context("Dashboard terminated abnormally")
}

/// Logging is best effort: the dashboard runs without a log file if the
/// subscriber cannot be set up.
fn setup_logging(config: &DashConfig) -> LogGuard {
    match init_logging(config.log_dir.clone(), config.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            LogGuard::disabled()
        }
    }
}

/// Install a panic hook that restores the terminal before printing the panic message.
fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore terminal state
        let _ = restore_terminal();

        // Call the original panic hook to print the panic message
        original_hook(panic_info);
    }));
}

/// Restore terminal to its normal state.
fn restore_terminal() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();

    let _ = crossterm::terminal::disable_raw_mode();
    crossterm::execute!(
        stdout,
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    stdout.flush()?;

    Ok(())
}
