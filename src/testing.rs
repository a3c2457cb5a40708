//! Testing utilities for pandaboot
//!
//! This module provides helper types for writing tests: a `TestLibrary`
//! wrapper around a temporary ROM directory, a scriptable `FakeEngine` and a
//! `FakeBinding` for the host graphics context.
//!
//! Only available when compiled with `cfg(test)`.

use crate::context::{ContextBinding, HostContext};
use crate::engine::{Engine, EngineError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory laid out like a ROM library, removed on drop
///
/// # Examples
/// ```ignore
/// let lib = TestLibrary::new();
/// lib.add_file("PANDA3DS/Zelda.3ds");
/// assert!(lib.root().join("PANDA3DS").is_dir());
/// ```
pub struct TestLibrary {
    dir: TempDir,
}

impl TestLibrary {
    /// Create an empty library directory
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temporary library");
        Self { dir }
    }

    /// Root of the library
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file (and any missing parents) relative to the root
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn add_file(&self, relative: impl AsRef<Path>) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        let mut file = fs::File::create(&path).expect("Failed to create test file");
        file.write_all(b"test content").expect("Failed to write test file");
        path
    }

    /// Create a directory relative to the root
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn add_dir(&self, relative: impl AsRef<Path>) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }
}

impl Default for TestLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// What [`FakeEngine::load_content`] does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Accept the ROM if the file exists
    Accept,
    /// Reject every ROM
    Reject,
    /// Fail with `EngineError::Internal`
    Fail(String),
    /// Panic with the given message
    Panic(String),
}

/// Engine that records every call
#[derive(Debug)]
pub struct FakeEngine {
    outcome: LoadOutcome,
    /// Paths passed to `load_content`, in order
    pub loads: Vec<PathBuf>,
    /// Number of `run` calls
    pub runs: usize,
}

impl FakeEngine {
    #[must_use]
    pub const fn new(outcome: LoadOutcome) -> Self {
        Self {
            outcome,
            loads: Vec::new(),
            runs: 0,
        }
    }
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self::new(LoadOutcome::Accept)
    }
}

impl Engine for FakeEngine {
    fn load_content(&mut self, path: &Path) -> Result<bool, EngineError> {
        self.loads.push(path.to_path_buf());
        match &self.outcome {
            LoadOutcome::Accept => Ok(path.is_file()),
            LoadOutcome::Reject => Ok(false),
            LoadOutcome::Fail(msg) => Err(EngineError::Internal(msg.clone())),
            LoadOutcome::Panic(msg) => panic!("{msg}"),
        }
    }

    fn run(&mut self) -> Result<(), EngineError> {
        self.runs += 1;
        Ok(())
    }
}

/// Host context binding with configurable failures
#[derive(Debug, Default)]
pub struct FakeBinding {
    /// Diagnostic returned by `make_current`, if it should fail
    pub current_error: Option<String>,
    /// Whether the function table fails to load
    pub table_fails: bool,
    /// Number of `make_current` calls
    pub adoptions: usize,
}

impl FakeBinding {
    /// Binding whose `make_current` fails with `message`
    #[must_use]
    pub fn rejecting(message: &str) -> Self {
        Self {
            current_error: Some(message.to_string()),
            ..Self::default()
        }
    }
}

impl ContextBinding for FakeBinding {
    fn make_current(&mut self, _host: &HostContext) -> Result<(), String> {
        self.adoptions += 1;
        self.current_error.clone().map_or(Ok(()), Err)
    }

    fn load_function_table(&mut self) -> bool {
        !self.table_fails
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_engine_records_calls() {
        let lib = TestLibrary::new();
        let rom = lib.add_file("Game.3ds");

        let mut engine = FakeEngine::default();
        assert!(engine.load_content(&rom).unwrap());
        assert!(!engine.load_content(&lib.root().join("missing.3ds")).unwrap());
        engine.run().unwrap();

        assert_eq!(engine.loads.len(), 2);
        assert_eq!(engine.runs, 1);
    }

    #[test]
    fn test_library_add_file_creates_parents() {
        let lib = TestLibrary::new();
        let path = lib.add_file("nested/dir/Game.3ds");

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "test content");
    }

    #[test]
    fn test_library_cleanup() {
        let root = {
            let lib = TestLibrary::new();
            lib.add_file("Game.3ds");
            lib.root().to_path_buf()
        };

        assert!(!root.exists());
    }
}
