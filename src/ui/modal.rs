//! Modal UI state machine
//!
//! Three mutually exclusive states own the render/input loop in turn: the
//! ROM selector, the retryable alert and the fatal alert. Each runs the same
//! cooperative loop:
//!
//! ```text
//! open ─▶ ┌─ drain events ─▶ exit? ─▶ present ─▶ frame delay ─┐ ─▶ close
//!         └───────────────────────────────────────────────────┘
//! ```
//!
//! A quit event ends any state immediately with [`Modal::QuitRequested`].

use super::error::{Result, UiError};
use super::traits::UiBackend;
use super::types::{Modal, Screen, UiEvent};
use crate::library::Catalog;
use std::convert::Infallible;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Default delay between frames (about 60 redraws per second)
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(16);

/// Shortest delay a configured pacer may use; modal loops never busy-spin
pub const MIN_FRAME_DELAY: Duration = Duration::from_millis(1);

/// Fixed per-frame delay capping the redraw rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePacer {
    delay: Duration,
}

impl FramePacer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Pacer that never sleeps
    #[cfg(test)]
    #[must_use]
    pub(crate) const fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleep until the next frame is due
    pub fn wait(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_DELAY)
    }
}

/// One modal state driven by [`run_modal`]
pub trait ModalState {
    /// Value produced when the state reaches its exit condition
    type Output;

    /// Apply one non-quit event
    fn on_event(&mut self, event: UiEvent);

    /// `Some` once the exit condition holds
    fn finished(&self) -> Option<Self::Output>;

    /// Frame to draw for the current state
    fn screen(&self) -> Screen<'_>;
}

/// Cursor over a non-empty catalog
#[derive(Debug)]
pub struct SelectionState<'a> {
    catalog: &'a Catalog,
    cursor: usize,
    confirmed: bool,
}

impl<'a> SelectionState<'a> {
    /// Start a selection at the first entry
    ///
    /// # Errors
    ///
    /// Returns `UiError::EmptyCatalog` if the catalog has no entries.
    pub fn new(catalog: &'a Catalog) -> Result<Self> {
        if catalog.is_empty() {
            return Err(UiError::EmptyCatalog);
        }
        Ok(Self {
            catalog,
            cursor: 0,
            confirmed: false,
        })
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Move cursor up
    pub const fn move_previous(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor down
    pub fn move_next(&mut self) {
        if self.cursor + 1 < self.catalog.len() {
            self.cursor += 1;
        }
    }
}

impl ModalState for SelectionState<'_> {
    type Output = usize;

    fn on_event(&mut self, event: UiEvent) {
        // The choice is locked once confirmed, even if more input is queued
        if self.confirmed {
            return;
        }
        match event {
            UiEvent::MovePrevious => self.move_previous(),
            UiEvent::MoveNext => self.move_next(),
            UiEvent::Confirm => self.confirmed = true,
            UiEvent::Quit | UiEvent::Other => {}
        }
    }

    fn finished(&self) -> Option<usize> {
        self.confirmed.then_some(self.cursor)
    }

    fn screen(&self) -> Screen<'_> {
        Screen::Selector {
            entries: self.catalog.entries(),
            cursor: self.cursor,
        }
    }
}

/// Alert that waits for a single acknowledgement
#[derive(Debug)]
pub struct RetryAlertState<'a> {
    message: &'a str,
    acknowledged: bool,
}

impl<'a> RetryAlertState<'a> {
    #[must_use]
    pub const fn new(message: &'a str) -> Self {
        Self {
            message,
            acknowledged: false,
        }
    }
}

impl ModalState for RetryAlertState<'_> {
    type Output = ();

    fn on_event(&mut self, event: UiEvent) {
        if event == UiEvent::Confirm {
            self.acknowledged = true;
        }
    }

    fn finished(&self) -> Option<()> {
        self.acknowledged.then_some(())
    }

    fn screen(&self) -> Screen<'_> {
        Screen::RetryableAlert {
            message: self.message,
        }
    }
}

/// Terminal alert; ignores every input and never finishes
#[derive(Debug)]
pub struct FatalAlertState<'a> {
    message: &'a str,
}

impl<'a> FatalAlertState<'a> {
    #[must_use]
    pub const fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl ModalState for FatalAlertState<'_> {
    type Output = Infallible;

    fn on_event(&mut self, _event: UiEvent) {}

    fn finished(&self) -> Option<Infallible> {
        None
    }

    fn screen(&self) -> Screen<'_> {
        Screen::FatalAlert {
            message: self.message,
        }
    }
}

/// Run a modal state until it finishes or a quit event arrives
///
/// The backend session is opened on entry and closed on every exit that
/// follows a successful open. Close failures are logged, not returned.
///
/// # Errors
///
/// Returns any error raised by the backend while opening, polling or presenting.
pub fn run_modal<B, M>(backend: &mut B, mut state: M, pacer: &FramePacer) -> Result<Modal<M::Output>>
where
    B: UiBackend + ?Sized,
    M: ModalState,
{
    let kind = state.screen().state();
    debug!(state = %kind, "entering modal state");

    backend.open()?;
    let outcome = drive(backend, &mut state, pacer);

    if let Err(e) = backend.close() {
        warn!(state = %kind, error = %e, "UI session teardown failed");
    }

    debug!(state = %kind, quit = outcome.as_ref().is_ok_and(Modal::is_quit), "leaving modal state");
    outcome
}

fn drive<B, M>(backend: &mut B, state: &mut M, pacer: &FramePacer) -> Result<Modal<M::Output>>
where
    B: UiBackend + ?Sized,
    M: ModalState,
{
    loop {
        while let Some(event) = backend.poll_event()? {
            if event == UiEvent::Quit {
                return Ok(Modal::QuitRequested);
            }
            state.on_event(event);
        }

        if let Some(output) = state.finished() {
            return Ok(Modal::Done(output));
        }

        backend.present(&state.screen())?;
        pacer.wait();
    }
}

/// Show the ROM list and return the confirmed index
///
/// The returned index is always within `0..catalog.len()`.
///
/// # Errors
///
/// Returns `UiError::EmptyCatalog` for an empty catalog, or any backend error.
pub fn run_selector<B>(backend: &mut B, catalog: &Catalog, pacer: &FramePacer) -> Result<Modal<usize>>
where
    B: UiBackend + ?Sized,
{
    let state = SelectionState::new(catalog)?;
    run_modal(backend, state, pacer)
}

/// Show `message` until the user acknowledges it
///
/// # Errors
///
/// Returns any backend error.
pub fn run_retryable_alert<B>(backend: &mut B, message: &str, pacer: &FramePacer) -> Result<Modal<()>>
where
    B: UiBackend + ?Sized,
{
    run_modal(backend, RetryAlertState::new(message), pacer)
}

/// Show `message` with the halted notice until the user quits
///
/// Returns `Ok(())` only once a quit event has been received.
///
/// # Errors
///
/// Returns any backend error.
pub fn run_fatal_alert<B>(backend: &mut B, message: &str, pacer: &FramePacer) -> Result<()>
where
    B: UiBackend + ?Sized,
{
    match run_modal(backend, FatalAlertState::new(message), pacer)? {
        Modal::Done(never) => match never {},
        Modal::QuitRequested => Ok(()),
    }
}
