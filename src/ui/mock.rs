//! Scripted UI backend for testing

use super::error::{Result, UiError};
use super::traits::UiBackend;
use super::types::{Screen, UiEvent, UiState};
use std::collections::VecDeque;

/// A frame the backend was asked to present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedFrame {
    pub state: UiState,
    /// Cursor position for selector frames
    pub cursor: Option<usize>,
}

/// Backend that replays scripted input, one batch per frame
///
/// Each inner `Vec` is delivered as the pending events for one loop
/// iteration. Once the script runs out every poll reports a quit, so a test
/// can never hang in a modal loop.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    frames: VecDeque<Vec<UiEvent>>,
    pending: VecDeque<UiEvent>,
    draining: bool,
    fail_open: bool,
    fail_present: bool,
    /// Frames presented so far
    pub presented: Vec<PresentedFrame>,
    /// Number of sessions opened
    pub opened: usize,
    /// Number of sessions closed
    pub closed: usize,
}

impl ScriptedBackend {
    /// Create a backend that replays `frames`
    #[must_use]
    pub fn new(frames: Vec<Vec<UiEvent>>) -> Self {
        Self {
            frames: frames.into(),
            ..Self::default()
        }
    }

    /// Make every `open` call fail
    #[must_use]
    pub const fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Make every `present` call fail
    #[must_use]
    pub const fn failing_present(mut self) -> Self {
        self.fail_present = true;
        self
    }

    /// States of all presented frames, in order
    #[must_use]
    pub fn states(&self) -> Vec<UiState> {
        self.presented.iter().map(|f| f.state.clone()).collect()
    }

    /// Cursor of every presented selector frame, in order
    #[must_use]
    pub fn cursors(&self) -> Vec<usize> {
        self.presented.iter().filter_map(|f| f.cursor).collect()
    }
}

impl UiBackend for ScriptedBackend {
    fn open(&mut self) -> Result<()> {
        if self.fail_open {
            return Err(UiError::Backend("scripted open failure".into()));
        }
        // Leftovers of a batch cut short by a quit belong to the previous modal
        self.pending.clear();
        self.draining = false;
        self.opened += 1;
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<UiEvent>> {
        if !self.draining {
            self.draining = true;
            match self.frames.pop_front() {
                Some(batch) => self.pending.extend(batch),
                None => self.pending.push_back(UiEvent::Quit),
            }
        }

        let event = self.pending.pop_front();
        if event.is_none() {
            self.draining = false;
        }
        Ok(event)
    }

    fn present(&mut self, screen: &Screen<'_>) -> Result<()> {
        if self.fail_present {
            return Err(UiError::Backend("scripted present failure".into()));
        }
        let cursor = match screen {
            Screen::Selector { cursor, .. } => Some(*cursor),
            _ => None,
        };
        self.presented.push(PresentedFrame {
            state: screen.state(),
            cursor,
        });
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(backend: &mut ScriptedBackend) -> Vec<UiEvent> {
        let mut events = Vec::new();
        while let Some(event) = backend.poll_event().unwrap() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_scripted_batches() {
        let mut backend = ScriptedBackend::new(vec![
            vec![UiEvent::MoveNext, UiEvent::Confirm],
            vec![],
            vec![UiEvent::Other],
        ]);

        assert_eq!(drain(&mut backend), vec![UiEvent::MoveNext, UiEvent::Confirm]);
        assert!(drain(&mut backend).is_empty());
        assert_eq!(drain(&mut backend), vec![UiEvent::Other]);
    }

    #[test]
    fn test_exhausted_script_quits() {
        let mut backend = ScriptedBackend::new(vec![]);
        assert_eq!(drain(&mut backend), vec![UiEvent::Quit]);
        assert_eq!(drain(&mut backend), vec![UiEvent::Quit]);
    }

    #[test]
    fn test_open_discards_batch_cut_short_by_quit() {
        let mut backend = ScriptedBackend::new(vec![
            vec![UiEvent::Quit, UiEvent::Confirm, UiEvent::MoveNext],
            vec![UiEvent::Other],
        ]);

        backend.open().unwrap();
        assert_eq!(backend.poll_event().unwrap(), Some(UiEvent::Quit));
        backend.close().unwrap();

        backend.open().unwrap();
        assert_eq!(drain(&mut backend), vec![UiEvent::Other]);
        assert_eq!(backend.opened, 2);
    }

    #[test]
    fn test_records_presented_frames() {
        let mut backend = ScriptedBackend::default();
        backend
            .present(&Screen::RetryableAlert { message: "again" })
            .unwrap();

        assert_eq!(backend.states(), vec![UiState::RetryableAlert("again".into())]);
        assert!(backend.cursors().is_empty());
    }
}
