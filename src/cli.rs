//! Command-line interface definitions and parsing
//!
//! Two argument surfaces share the same positional layout: the `pandaboot`
//! binary ([`Cli`]) and the argument vector a host passes to the embedded
//! entry point ([`EmbeddedArgs`]).
//!
//! | Position | Meaning                                      |
//! |----------|----------------------------------------------|
//! | 1        | ROM to load directly (skips scan and picker) |
//! | 2        | Local-state directory override               |
//!
//! # Examples
//!
//! ```
//! use pandaboot::cli::EmbeddedArgs;
//! use std::path::{Path, PathBuf};
//!
//! let args = EmbeddedArgs::try_from_args(["host", "game.3ds"]).unwrap();
//! assert_eq!(args.content(), Some(Path::new("game.3ds")));
//! ```

use crate::config::LauncherConfig;
use crate::launcher::{LaunchArgs, LaunchMode};
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Arguments of the `pandaboot` binary
#[derive(Parser, Debug)]
#[command(name = "pandaboot")]
#[command(version, about = "Pick a 3DS ROM and hand it to the emulator", long_about = None)]
pub struct Cli {
    /// ROM to load directly, relative to the current directory
    #[arg(value_name = "CONTENT")]
    pub content: Option<PathBuf>,

    /// Local-state directory, scanned after the storage root
    #[arg(value_name = "LOCAL_STATE")]
    pub local_state: Option<PathBuf>,

    /// Skip scanning and the ROM picker; load CONTENT if given and run
    #[arg(long = "standalone")]
    pub standalone: bool,

    /// Suppress informational output
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Delay between UI frames in milliseconds, at least 1 (overrides config)
    #[arg(long = "frame-delay-ms", value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub frame_delay_ms: Option<u64>,

    /// Log debug diagnostics to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Write the effective settings to the config file before launching
    #[arg(long = "save-config")]
    pub save_config: bool,
}

impl Cli {
    /// Parse arguments from the process command line
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Launch arguments described by this command line
    #[must_use]
    pub fn launch_args(&self) -> LaunchArgs {
        let mode = if self.standalone {
            LaunchMode::Standalone
        } else {
            LaunchMode::Embedded
        };
        LaunchArgs {
            content: self.content.clone(),
            local_state: self.local_state.clone(),
            mode,
        }
    }

    /// Apply command-line overrides on top of the loaded configuration
    ///
    /// The local-state override is not applied here; it travels with
    /// [`LaunchArgs`] and only lasts for one launch.
    #[must_use]
    pub fn apply_to(&self, mut config: LauncherConfig) -> LauncherConfig {
        if self.quiet {
            config.quiet = true;
        }
        if let Some(ms) = self.frame_delay_ms {
            config.frame_delay_ms = ms;
        }
        config
    }
}

/// Argument vector handed to the embedded entry point
///
/// Arguments past the second are ignored, as are flags, so a host can pass
/// its own command line through unchanged. An empty slot counts as unset.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct EmbeddedArgs {
    #[arg(allow_hyphen_values = true)]
    content: Option<OsString>,

    #[arg(allow_hyphen_values = true)]
    local_state: Option<OsString>,

    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<OsString>,
}

impl EmbeddedArgs {
    /// Parse a host argument vector (element 0 is the program name)
    ///
    /// # Errors
    ///
    /// Returns a `clap::Error` if the vector cannot be parsed.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// ROM to load directly
    #[must_use]
    pub fn content(&self) -> Option<&Path> {
        slot(self.content.as_ref())
    }

    /// Local-state directory override
    #[must_use]
    pub fn local_state(&self) -> Option<&Path> {
        slot(self.local_state.as_ref())
    }

    /// Launch arguments for an embedded launch
    #[must_use]
    pub fn into_launch_args(self) -> LaunchArgs {
        LaunchArgs::embedded(
            self.content().map(Path::to_path_buf),
            self.local_state().map(Path::to_path_buf),
        )
    }
}

fn slot(value: Option<&OsString>) -> Option<&Path> {
    value.filter(|v| !v.is_empty()).map(Path::new)
}
