//! Ratatui-based terminal backend
//!
//! This module provides an implementation of the `UiBackend` trait using
//! ratatui for drawing and crossterm for terminal events. It is the
//! frontend used by the `pandaboot` binary and during development.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           RatatuiBackend                    │
//! │  (implements UiBackend trait)               │
//! └────────────────────┬────────────────────────┘
//!                      │
//!               ┌──────┴──────┐
//!               ▼             ▼
//!        ┌───────────┐ ┌───────────┐
//!        │  Ratatui  │ │ Crossterm │
//!        │ (widgets) │ │  (events) │
//!        └───────────┘ └───────────┘
//! ```

mod backend;
mod events;
mod theme;
pub mod widgets;

pub use backend::RatatuiBackend;
pub use events::{map_event, map_key, map_mouse};
pub use theme::Theme;
