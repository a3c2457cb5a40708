//! Host rendering context adoption
//!
//! The window and rendering context are created and owned by the host
//! process. This module only borrows them: it makes the context current on
//! the calling thread and checks that the graphics function table resolves.
//! Nothing here ever destroys or recreates the host's context.

use std::ffi::c_void;
use std::ptr;
use thiserror::Error;
use tracing::{debug, error};

/// Errors raised while adopting the host context
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// The host refused to make its context current on this thread
    #[error("Failed to make the host context current: {0}")]
    AdoptionFailed(String),

    /// The graphics function table could not be resolved
    #[error("Failed to load the graphics function table")]
    FunctionTableLoadFailed,
}

/// Borrowed handle to the host's window
///
/// Wraps a raw pointer, so it is neither `Send` nor `Sync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle(*mut c_void);

impl WindowHandle {
    /// Wrap a raw window pointer supplied by the host
    #[must_use]
    pub const fn from_raw(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    /// Handle for hosts without a native window (terminal frontends)
    #[must_use]
    pub const fn detached() -> Self {
        Self(ptr::null_mut())
    }

    /// Raw pointer, for passing back to the host binding
    #[must_use]
    pub const fn as_raw(self) -> *mut c_void {
        self.0
    }

    #[must_use]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

/// Borrowed handle to the host's rendering context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextHandle(*mut c_void);

impl ContextHandle {
    /// Wrap a raw context pointer supplied by the host
    #[must_use]
    pub const fn from_raw(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    /// Handle for hosts without a native rendering context
    #[must_use]
    pub const fn detached() -> Self {
        Self(ptr::null_mut())
    }

    #[must_use]
    pub const fn as_raw(self) -> *mut c_void {
        self.0
    }

    #[must_use]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

/// The host's window and rendering context, borrowed for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostContext {
    window: WindowHandle,
    context: ContextHandle,
}

impl HostContext {
    #[must_use]
    pub const fn new(window: WindowHandle, context: ContextHandle) -> Self {
        Self { window, context }
    }

    /// Host context for frontends that draw without a native surface
    #[must_use]
    pub const fn detached() -> Self {
        Self::new(WindowHandle::detached(), ContextHandle::detached())
    }

    #[must_use]
    pub const fn window(&self) -> WindowHandle {
        self.window
    }

    #[must_use]
    pub const fn context(&self) -> ContextHandle {
        self.context
    }
}

/// Graphics binding supplied by the host integration
///
/// Implementations wrap the platform's "make current" call and the
/// function-pointer resolver used to load the graphics function table.
pub trait ContextBinding {
    /// Make the host context current on the calling thread
    ///
    /// # Errors
    ///
    /// Returns the host-reported diagnostic when the context cannot be made current.
    fn make_current(&mut self, host: &HostContext) -> Result<(), String>;

    /// Resolve the graphics function table through the host's resolver
    ///
    /// Returns `false` when the table cannot be loaded.
    fn load_function_table(&mut self) -> bool;
}

/// Proof that the host context is current on this thread
///
/// Holds the borrowed handles; like them it cannot leave the adopting thread.
#[derive(Debug)]
pub struct Ready {
    host: HostContext,
}

impl Ready {
    /// The adopted host context
    #[must_use]
    pub const fn host(&self) -> &HostContext {
        &self.host
    }
}

/// Adopt the host context for the calling thread
///
/// The function table is only resolved once the context is current.
///
/// # Errors
///
/// Returns `ContextError::AdoptionFailed` with the host diagnostic if the
/// context cannot be made current, or `ContextError::FunctionTableLoadFailed`
/// if the function table does not resolve.
pub fn adopt<B>(binding: &mut B, host: HostContext) -> Result<Ready, ContextError>
where
    B: ContextBinding + ?Sized,
{
    if let Err(diagnostic) = binding.make_current(&host) {
        error!(%diagnostic, "make-current failed");
        return Err(ContextError::AdoptionFailed(diagnostic));
    }

    if !binding.load_function_table() {
        error!("graphics function table did not resolve");
        return Err(ContextError::FunctionTableLoadFailed);
    }

    debug!(
        window_attached = !host.window().is_null(),
        context_attached = !host.context().is_null(),
        "host context adopted"
    );
    Ok(Ready { host })
}

/// Binding for terminal frontends
///
/// A terminal needs no graphics context, so adoption always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalHost;

impl ContextBinding for TerminalHost {
    fn make_current(&mut self, _host: &HostContext) -> Result<(), String> {
        Ok(())
    }

    fn load_function_table(&mut self) -> bool {
        true
    }
}
