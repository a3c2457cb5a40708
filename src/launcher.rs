//! Launch orchestration
//!
//! [`Launcher::launch`] runs one launch from start to finish:
//!
//! 1. adopt the host context (failure ends the launch with
//!    [`ExitStatus::ContextFailure`], no UI is shown)
//! 2. pick a ROM: the direct path argument if given, otherwise scan storage,
//!    loop on the retryable alert while nothing is found, then show the
//!    selector
//! 3. load the ROM into the engine and hand over to its run loop
//!
//! Steps 2 and 3 run behind a failure boundary. Any error or panic that
//! escapes them is shown on the fatal alert, which only a quit leaves. A
//! panic raised while the fatal alert itself is shown is caught too; the
//! failure is then written to the output and the launch still ends halted.

use crate::LaunchError;
use crate::config::LauncherConfig;
use crate::context::{self, ContextBinding, HostContext, Ready};
use crate::engine::Engine;
use crate::library::{self, Catalog, ScanConfig};
use crate::ui::output::{OutputWriter, StdoutWriter};
use crate::ui::{FramePacer, Modal, UiBackend, run_fatal_alert, run_retryable_alert, run_selector};
use std::any::Any;
use std::env;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, error, info, warn};

/// Printed in standalone mode when no ROM argument is given
pub const NO_ROM_MESSAGE: &str =
    "No ROM inserted! Load a ROM by dragging and dropping it into the emulator window!";

/// How a launch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The engine ran and returned
    Success,
    /// The user closed the window before the engine started
    Quit,
    /// The host context could not be adopted
    ContextFailure,
    /// The chosen ROM could not be loaded
    LoadFailure,
    /// An unrecoverable failure was shown on the fatal alert
    Halted,
}

impl ExitStatus {
    /// Process exit code for this status
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success | Self::Quit => 0,
            Self::ContextFailure => 1,
            Self::LoadFailure => 2,
            Self::Halted => 3,
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        self.code() == 0
    }
}

/// Which entry point started the launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchMode {
    /// Started by a host that owns the window (scan and selector enabled)
    #[default]
    Embedded,
    /// Plain process start: the ROM comes from the command line only
    Standalone,
}

/// Arguments of one launch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchArgs {
    /// ROM to load directly, skipping scan and selection
    pub content: Option<PathBuf>,
    /// Replaces the configured local-state directory for this launch
    pub local_state: Option<PathBuf>,
    pub mode: LaunchMode,
}

impl LaunchArgs {
    #[must_use]
    pub const fn embedded(content: Option<PathBuf>, local_state: Option<PathBuf>) -> Self {
        Self {
            content,
            local_state,
            mode: LaunchMode::Embedded,
        }
    }

    #[must_use]
    pub const fn standalone(content: Option<PathBuf>) -> Self {
        Self {
            content,
            local_state: None,
            mode: LaunchMode::Standalone,
        }
    }
}

/// Message shown on the retryable alert when no ROM was found
#[must_use]
pub fn no_content_message(catalog: &Catalog, extensions: &[String]) -> String {
    let kinds = extensions
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(" or ");
    let mut message = format!("No ROMs found. Copy {kinds} files into one of these folders:\n");
    for dir in catalog.searched() {
        message.push_str(&format!("\n  {}", dir.display()));
    }
    message
}

/// Resolve a ROM argument against the current working directory
///
/// Absolute paths are returned unchanged.
///
/// # Errors
///
/// Returns an I/O error if the current directory cannot be determined.
pub fn resolve_content_path(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(env::current_dir()?.join(path))
}

/// Describe a panic payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown failure".to_string()
    }
}

/// Drives one launch over the host's context binding, UI backend and engine
///
/// The launcher is tied to the thread that created it.
pub struct Launcher<C, B, E> {
    binding: C,
    backend: B,
    engine: E,
    config: LauncherConfig,
    output: Rc<dyn OutputWriter>,
}

impl<C, B, E> Launcher<C, B, E>
where
    C: ContextBinding,
    B: UiBackend,
    E: Engine,
{
    #[must_use]
    pub fn new(binding: C, backend: B, engine: E) -> Self {
        Self {
            binding,
            backend,
            engine,
            config: LauncherConfig::default(),
            output: Rc::new(StdoutWriter::new()),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: LauncherConfig) -> Self {
        self.config = config;
        self
    }

    /// Route user-facing messages to `output`
    #[must_use]
    pub fn with_output(mut self, output: Rc<dyn OutputWriter>) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &LauncherConfig {
        &self.config
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub const fn binding(&self) -> &C {
        &self.binding
    }

    /// Give back the owned capabilities
    pub fn into_parts(self) -> (C, B, E) {
        (self.binding, self.backend, self.engine)
    }

    /// Run one launch to completion
    pub fn launch(&mut self, host: HostContext, args: &LaunchArgs) -> ExitStatus {
        let ready = match context::adopt(&mut self.binding, host) {
            Ok(ready) => ready,
            Err(e) => {
                self.output.error(&e.to_string());
                return ExitStatus::ContextFailure;
            }
        };

        let pacer = self.config.frame_pacer();
        let outcome = catch_unwind(AssertUnwindSafe(|| self.launch_guarded(&ready, args, &pacer)));

        let failure = match outcome {
            Ok(Ok(status)) => {
                info!(?status, "launch finished");
                return status;
            }
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };

        error!(%failure, "unrecoverable launch failure");
        self.halt(&failure, &pacer)
    }

    fn launch_guarded(&mut self, ready: &Ready, args: &LaunchArgs, pacer: &FramePacer) -> Result<ExitStatus, LaunchError> {
        debug!(mode = ?args.mode, host = ?ready.host(), "starting launch");
        let config = self
            .config
            .clone()
            .with_local_state_override(args.local_state.clone());

        match args.mode {
            LaunchMode::Embedded => self.launch_embedded(&config, args, pacer),
            LaunchMode::Standalone => self.launch_standalone(args),
        }
    }

    fn launch_embedded(&mut self, config: &LauncherConfig, args: &LaunchArgs, pacer: &FramePacer) -> Result<ExitStatus, LaunchError> {
        let path = match &args.content {
            Some(path) => resolve_content_path(path)?,
            None => match self.choose(&config.scan_config(), pacer)? {
                Modal::Done(path) => path,
                Modal::QuitRequested => return Ok(ExitStatus::Quit),
            },
        };

        self.output.info(&format!("Loading {}", path.display()));
        if !self.engine.load_content(&path)? {
            warn!(path = %path.display(), "ROM failed to load");
            self.output
                .error(&format!("Failed to load ROM file: {}", path.display()));
            return Ok(ExitStatus::LoadFailure);
        }

        self.output.success(&format!("Loaded {}", path.display()));
        info!(path = %path.display(), "ROM loaded, starting engine");
        self.engine.run()?;
        Ok(ExitStatus::Success)
    }

    fn launch_standalone(&mut self, args: &LaunchArgs) -> Result<ExitStatus, LaunchError> {
        match &args.content {
            Some(path) => {
                let path = resolve_content_path(path)?;
                self.output.info(&format!("Loading {}", path.display()));
                if self.engine.load_content(&path)? {
                    self.output.success(&format!("Loaded {}", path.display()));
                } else {
                    warn!(path = %path.display(), "ROM failed to load");
                    self.output
                        .error(&format!("Failed to load ROM file: {}", path.display()));
                }
            }
            None => self.output.warning(NO_ROM_MESSAGE),
        }

        self.engine.run()?;
        Ok(ExitStatus::Success)
    }

    /// Scan until something is found, then let the user pick
    fn choose(&mut self, scan: &ScanConfig, pacer: &FramePacer) -> Result<Modal<PathBuf>, LaunchError> {
        let mut catalog = library::scan_all(scan);

        while catalog.is_empty() {
            let message = no_content_message(&catalog, &scan.extensions);
            if run_retryable_alert(&mut self.backend, &message, pacer)?.is_quit() {
                return Ok(Modal::QuitRequested);
            }
            catalog = library::scan_all(scan);
        }

        match run_selector(&mut self.backend, &catalog, pacer)? {
            Modal::Done(index) => {
                let entry = catalog
                    .get(index)
                    .ok_or_else(|| LaunchError::Other(format!("Selection {index} is out of range")))?;
                debug!(title = entry.title(), "ROM selected");
                Ok(Modal::Done(entry.path().to_path_buf()))
            }
            Modal::QuitRequested => Ok(Modal::QuitRequested),
        }
    }

    /// Show the fatal alert until the user quits
    ///
    /// When the alert cannot be shown, because the backend fails or panics,
    /// the failure goes to the output instead.
    fn halt(&mut self, failure: &str, pacer: &FramePacer) -> ExitStatus {
        let shown = catch_unwind(AssertUnwindSafe(|| run_fatal_alert(&mut self.backend, failure, pacer)));

        let reason = match shown {
            Ok(Ok(_)) => return ExitStatus::Halted,
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };

        error!(%reason, "fatal alert could not be shown");
        self.output.error(failure);
        ExitStatus::Halted
    }
}
