//! Pandaboot - bootstrap and launch layer for the Panda3DS frontend
//!
//! This library adopts a rendering context owned by a host process, scans
//! local storage for ROMs, drives the modal launch UI (ROM selector,
//! retryable alert, fatal alert) and finally hands control to the emulator
//! engine's run loop.
//!
//! The graphics binding, the engine and the UI renderer are all external
//! capabilities, expressed as the [`ContextBinding`], [`Engine`] and
//! [`UiBackend`] traits.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod context;
pub mod embedded;
pub mod engine;
pub mod launcher;
pub mod library;
pub mod ui;

#[cfg(test)]
pub mod testing;

pub use context::{ContextBinding, ContextError, ContextHandle, HostContext, Ready, WindowHandle};
pub use engine::{Engine, EngineError};
pub use launcher::{ExitStatus, LaunchArgs, LaunchMode, Launcher};
pub use library::{Catalog, ContentEntry, ScanConfig};
pub use ui::{UiBackend, UiError};

/// Error enum, contains every failure the launcher can surface past context adoption
#[derive(Debug, Error)]
pub enum LaunchError {
    /// UI backend failure
    #[error("UI error: {0}")]
    Ui(#[from] UiError),
    /// Engine failure
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Any other failure, described as text
    #[error("{0}")]
    Other(String),
}
