//! Emulator engine capability
//!
//! The launcher never looks inside the engine: it asks it to load one ROM
//! and then hands over control to its blocking run loop.

use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Failures the engine raises beyond a plain "could not load"
#[derive(Debug, Error)]
pub enum EngineError {
    /// I/O failure inside the engine
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal engine failure
    #[error("Internal engine failure: {0}")]
    Internal(String),
}

/// Execution engine driven by the launcher
pub trait Engine {
    /// Load the ROM at `path`
    ///
    /// Returns `Ok(false)` when the ROM is missing or rejected; that case is
    /// reported to the user and is not treated as fatal.
    ///
    /// # Errors
    ///
    /// Returns an `EngineError` for failures other than a rejected ROM.
    fn load_content(&mut self, path: &Path) -> Result<bool, EngineError>;

    /// Run until the user exits
    ///
    /// # Errors
    ///
    /// Returns an `EngineError` if the run loop fails.
    fn run(&mut self) -> Result<(), EngineError>;
}

impl<E: Engine + ?Sized> Engine for &mut E {
    fn load_content(&mut self, path: &Path) -> Result<bool, EngineError> {
        (**self).load_content(path)
    }

    fn run(&mut self) -> Result<(), EngineError> {
        (**self).run()
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn load_content(&mut self, path: &Path) -> Result<bool, EngineError> {
        (**self).load_content(path)
    }

    fn run(&mut self) -> Result<(), EngineError> {
        (**self).run()
    }
}

/// Stand-in engine that only checks a ROM can be opened
///
/// `run` returns immediately. Used by the terminal binary when no real
/// emulator core is linked.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    loaded: Option<PathBuf>,
}

impl HeadlessEngine {
    #[must_use]
    pub const fn new() -> Self {
        Self { loaded: None }
    }

    /// The ROM accepted by the last successful load
    #[must_use]
    pub fn loaded(&self) -> Option<&Path> {
        self.loaded.as_deref()
    }
}

impl Engine for HeadlessEngine {
    fn load_content(&mut self, path: &Path) -> Result<bool, EngineError> {
        if !path.is_file() {
            warn!(path = %path.display(), "ROM is not a regular file");
            return Ok(false);
        }

        match File::open(path) {
            Ok(_) => {
                self.loaded = Some(path.to_path_buf());
                Ok(true)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ROM could not be opened");
                Ok(false)
            }
        }
    }

    fn run(&mut self) -> Result<(), EngineError> {
        match &self.loaded {
            Some(path) => info!(path = %path.display(), "headless engine ran ROM"),
            None => info!("headless engine ran without a ROM"),
        }
        Ok(())
    }
}
