//! Pandaboot terminal launcher
//!
//! Runs the launch flow in a terminal: scans storage for ROMs, shows the
//! picker and alerts with ratatui, and hands the chosen ROM to the engine.
//!
//! # Usage
//!
//! ```bash
//! # Scan storage and pick a ROM
//! pandaboot
//!
//! # Load a ROM directly
//! pandaboot games/zelda.3ds
//!
//! # Also scan a local-state directory
//! pandaboot "" ~/.local/share/panda3ds
//!
//! # Plain process start without scan or picker
//! pandaboot --standalone games/zelda.3ds
//! ```
//!
//! # Configuration
//!
//! Settings are read from `~/.config/pandaboot/config.toml` (optional) and
//! `PANDABOOT_*` environment variables. `--save-config` writes the effective
//! settings, command-line overrides included, back to that file. Logging
//! follows `RUST_LOG`.

use pandaboot::cli::Cli;
use pandaboot::config::LauncherConfig;
use pandaboot::context::TerminalHost;
use pandaboot::engine::HeadlessEngine;
use pandaboot::ui::RatatuiBackend;
use pandaboot::ui::output::{OutputWriter, QuietWriter, StdoutWriter};
use pandaboot::{ExitStatus, HostContext, Launcher};
use std::process::ExitCode;
use std::rc::Rc;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the stderr log subscriber
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, defaulting to `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> LauncherConfig {
    let config = LauncherConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "configuration could not be loaded, using defaults");
        LauncherConfig::default()
    });
    cli.apply_to(config)
}

fn save_config(config: &LauncherConfig, output: &dyn OutputWriter) {
    match LauncherConfig::config_path().and_then(|path| config.save_to(&path).map(|()| path)) {
        Ok(path) => output.success(&format!("Configuration saved to {}", path.display())),
        Err(e) => output.error(&format!("Could not save configuration: {e}")),
    }
}

fn run(cli: &Cli) -> ExitStatus {
    let config = load_config(cli);
    let output: Rc<dyn OutputWriter> = if config.quiet {
        Rc::new(QuietWriter)
    } else {
        Rc::new(StdoutWriter::new())
    };

    if cli.save_config {
        save_config(&config, output.as_ref());
    }

    let mut launcher = Launcher::new(TerminalHost, RatatuiBackend::new(), HeadlessEngine::new())
        .with_config(config)
        .with_output(output);

    launcher.launch(HostContext::detached(), &cli.launch_args())
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let status = run(&cli);
    ExitCode::from(u8::try_from(status.code()).unwrap_or(1))
}
