//! UI abstraction layer
//!
//! This module provides the modal launch UI: the ROM selector, the
//! retryable alert and the fatal alert. The state machine only talks to a
//! [`UiBackend`], so the same states drive a host's immediate-mode renderer,
//! the bundled ratatui terminal frontend, or a scripted test backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Launcher (orchestration)           │
//! └────────────────┬────────────────────────┘
//!                  │ run_selector / run_*_alert
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │      Modal state machine (modal.rs)     │
//! │  poll ─▶ update ─▶ present ─▶ delay     │
//! └────────────────┬────────────────────────┘
//!                  │ UiBackend trait
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ Host renderer │  │ RatatuiBackend    │
//! │ (embedded)    │  │ (terminal)        │
//! └───────────────┘  └───────────────────┘
//! ```
//!
//! ## Implementing a Custom Backend
//!
//! ```no_run
//! use pandaboot::ui::{Result, Screen, UiBackend, UiEvent};
//!
//! struct MyBackend;
//!
//! impl UiBackend for MyBackend {
//!     fn open(&mut self) -> Result<()> { Ok(()) }
//!     fn poll_event(&mut self) -> Result<Option<UiEvent>> { Ok(None) }
//!     fn present(&mut self, _screen: &Screen<'_>) -> Result<()> {
//!         // Draw the screen with your renderer
//!         Ok(())
//!     }
//!     fn close(&mut self) -> Result<()> { Ok(()) }
//! }
//! ```

mod error;
mod traits;
mod types;

pub mod modal;
pub mod output;
pub mod ratatui_adapter;

#[cfg(test)]
pub mod mock;

pub use error::{Result, UiError};
pub use modal::{FramePacer, run_fatal_alert, run_retryable_alert, run_selector};
pub use output::{BufferedWriter, MessageLevel, OutputWriter, QuietWriter, StdoutWriter};
pub use ratatui_adapter::RatatuiBackend;
pub use traits::UiBackend;
pub use types::{HALTED_NOTICE, Modal, Screen, UiEvent, UiState};
