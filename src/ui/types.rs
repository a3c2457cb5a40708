//! Common types for the modal UI

use crate::library::ContentEntry;
use std::fmt;

/// Notice shown under every fatal alert
pub const HALTED_NOTICE: &str = "The application has been halted.";

/// Backend-neutral input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Move the selection towards the start of the list
    MovePrevious,
    /// Move the selection towards the end of the list
    MoveNext,
    /// Confirm / acknowledge
    Confirm,
    /// The window was closed or the user asked to quit
    Quit,
    /// Any other event (resize, unmapped key, ...)
    Other,
}

/// What a modal state asks the backend to draw for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    /// ROM list with the entry at `cursor` highlighted
    Selector {
        entries: &'a [ContentEntry],
        cursor: usize,
    },
    /// Message with an acknowledge prompt
    RetryableAlert { message: &'a str },
    /// Message followed by [`HALTED_NOTICE`]
    FatalAlert { message: &'a str },
}

impl Screen<'_> {
    /// Which modal state produced this screen
    #[must_use]
    pub fn state(&self) -> UiState {
        match self {
            Self::Selector { .. } => UiState::Selector,
            Self::RetryableAlert { message } => UiState::RetryableAlert((*message).to_string()),
            Self::FatalAlert { message } => UiState::FatalAlert((*message).to_string()),
        }
    }
}

/// The active modal state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    Selector,
    RetryableAlert(String),
    FatalAlert(String),
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector => write!(f, "selector"),
            Self::RetryableAlert(_) => write!(f, "retryable alert"),
            Self::FatalAlert(_) => write!(f, "fatal alert"),
        }
    }
}

/// How a modal state ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal<T> {
    /// The state reached its exit condition
    Done(T),
    /// The user closed the window
    QuitRequested,
}

impl<T> Modal<T> {
    #[must_use]
    pub const fn is_quit(&self) -> bool {
        matches!(self, Self::QuitRequested)
    }
}
