//! Core traits for the UI abstraction layer

use super::error::Result;
use super::types::{Screen, UiEvent};

/// Rendering and input capability used by the modal states
///
/// Each modal state opens its own session on entry and closes it on exit,
/// so no UI state survives from one state to the next. All methods are
/// called from the thread that adopted the host context.
pub trait UiBackend {
    /// Acquire the UI rendering context for one modal state
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be initialized.
    fn open(&mut self) -> Result<()>;

    /// Return the next pending event, or `None` once the queue is drained
    ///
    /// Must not block waiting for input.
    ///
    /// # Errors
    ///
    /// Returns an error if event polling fails.
    fn poll_event(&mut self) -> Result<Option<UiEvent>>;

    /// Render and present one frame
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or presenting fails.
    fn present(&mut self, screen: &Screen<'_>) -> Result<()>;

    /// Release the UI rendering context
    ///
    /// # Errors
    ///
    /// Returns an error if teardown fails.
    fn close(&mut self) -> Result<()>;
}

impl<B: UiBackend + ?Sized> UiBackend for &mut B {
    fn open(&mut self) -> Result<()> {
        (**self).open()
    }

    fn poll_event(&mut self) -> Result<Option<UiEvent>> {
        (**self).poll_event()
    }

    fn present(&mut self, screen: &Screen<'_>) -> Result<()> {
        (**self).present(screen)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<B: UiBackend + ?Sized> UiBackend for Box<B> {
    fn open(&mut self) -> Result<()> {
        (**self).open()
    }

    fn poll_event(&mut self) -> Result<Option<UiEvent>> {
        (**self).poll_event()
    }

    fn present(&mut self, screen: &Screen<'_>) -> Result<()> {
        (**self).present(screen)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
