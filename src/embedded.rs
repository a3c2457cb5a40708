//! Embedded entry point
//!
//! A host process that already owns the window and the graphics context
//! calls [`external_main`] from its own `extern "C"` shim with its handles
//! and its argument vector. The call returns a process-style exit code and
//! never lets a panic unwind into the host.

use crate::cli::EmbeddedArgs;
use crate::config::LauncherConfig;
use crate::context::{ContextBinding, ContextHandle, HostContext, WindowHandle};
use crate::engine::Engine;
use crate::launcher::{ExitStatus, LaunchArgs, Launcher};
use crate::ui::UiBackend;
use crate::ui::output::{OutputWriter, QuietWriter, StdoutWriter};
use std::ffi::{CStr, c_char, c_int, c_void};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;
use tracing::{error, warn};

/// Convert a C `argc`/`argv` pair into owned strings
///
/// A null `argv` or a negative `argc` yields an empty vector, null elements
/// become empty strings and invalid UTF-8 is replaced lossily.
///
/// # Safety
///
/// When `argv` is non-null it must point to at least `argc` pointers, each
/// of which is null or points to a nul-terminated string that stays valid
/// for the duration of the call.
#[must_use]
pub unsafe fn args_from_raw(argc: c_int, argv: *const *const c_char) -> Vec<String> {
    let Ok(count) = usize::try_from(argc) else {
        return Vec::new();
    };
    if argv.is_null() {
        return Vec::new();
    }

    (0..count)
        .map(|i| {
            // SAFETY: the caller guarantees `argv` holds `argc` elements
            let arg = unsafe { *argv.add(i) };
            if arg.is_null() {
                String::new()
            } else {
                // SAFETY: non-null elements are nul-terminated strings
                unsafe { CStr::from_ptr(arg) }.to_string_lossy().into_owned()
            }
        })
        .collect()
}

/// Launch over host-owned handles and return an exit code
///
/// `args[0]` is the program name, `args[1]` an optional ROM path and
/// `args[2]` an optional local-state directory. Configuration is loaded from
/// the user's config file and environment; a broken configuration falls back
/// to defaults.
#[must_use]
pub fn run_embedded<C, B, E>(
    binding: C,
    backend: B,
    engine: E,
    host: HostContext,
    args: &[String],
) -> i32
where
    C: ContextBinding,
    B: UiBackend,
    E: Engine,
{
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let config = LauncherConfig::load().unwrap_or_else(|e| {
            warn!(error = %e, "configuration could not be loaded, using defaults");
            LauncherConfig::default()
        });
        let launch_args = parse_args(args);
        let output: Rc<dyn OutputWriter> = if config.quiet {
            Rc::new(QuietWriter)
        } else {
            Rc::new(StdoutWriter::new())
        };

        Launcher::new(binding, backend, engine)
            .with_config(config)
            .with_output(output)
            .launch(host, &launch_args)
    }));

    match outcome {
        Ok(status) => status.code(),
        Err(_) => {
            error!("launch panicked outside the failure boundary");
            ExitStatus::Halted.code()
        }
    }
}

/// Rust-side adapter behind a host's `extern "C"` entry shim
///
/// This function is generic and not itself callable from C. A host crate
/// exports a concrete `extern "C"` function that builds its binding, backend
/// and engine, then forwards its raw window and context handles and its
/// `argc`/`argv` here. See [`run_embedded`].
///
/// # Safety
///
/// `window` and `context` must be null or valid host handles that outlive
/// the call, and `argc`/`argv` must satisfy the contract of
/// [`args_from_raw`].
#[must_use]
pub unsafe fn external_main<C, B, E>(
    binding: C,
    backend: B,
    engine: E,
    window: *mut c_void,
    context: *mut c_void,
    argc: c_int,
    argv: *const *const c_char,
) -> i32
where
    C: ContextBinding,
    B: UiBackend,
    E: Engine,
{
    // SAFETY: forwarded from the caller
    let args = unsafe { args_from_raw(argc, argv) };
    let host = HostContext::new(WindowHandle::from_raw(window), ContextHandle::from_raw(context));
    run_embedded(binding, backend, engine, host, &args)
}

fn parse_args(args: &[String]) -> LaunchArgs {
    match EmbeddedArgs::try_from_args(args) {
        Ok(parsed) => parsed.into_launch_args(),
        Err(e) => {
            warn!(error = %e, "host arguments not understood, scanning instead");
            LaunchArgs::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBinding, FakeEngine, TestLibrary};
    use crate::ui::mock::ScriptedBackend;
    use std::ffi::CString;
    use std::path::Path;
    use std::ptr;

    struct ExplodingBinding;

    impl ContextBinding for ExplodingBinding {
        fn make_current(&mut self, _host: &HostContext) -> Result<(), String> {
            panic!("driver crashed");
        }

        fn load_function_table(&mut self) -> bool {
            true
        }
    }

    #[test]
    fn test_args_from_raw() {
        let owned: Vec<CString> = ["host", "rom.3ds", "/state"]
            .iter()
            .map(|s| CString::new(*s).unwrap())
            .collect();
        let ptrs: Vec<*const c_char> = owned.iter().map(|s| s.as_ptr()).collect();

        let args = unsafe { args_from_raw(3, ptrs.as_ptr()) };
        assert_eq!(args, vec!["host", "rom.3ds", "/state"]);
    }

    #[test]
    fn test_args_from_raw_null_and_negative() {
        assert!(unsafe { args_from_raw(2, ptr::null()) }.is_empty());

        let host = CString::new("host").unwrap();
        let ptrs = [host.as_ptr()];
        assert!(unsafe { args_from_raw(-1, ptrs.as_ptr()) }.is_empty());
    }

    #[test]
    fn test_args_from_raw_null_element_and_invalid_utf8() {
        let bad = CString::new(vec![b'r', 0xFF, b'm']).unwrap();
        let ptrs = [ptr::null(), bad.as_ptr()];

        let args = unsafe { args_from_raw(2, ptrs.as_ptr()) };
        assert_eq!(args[0], "");
        assert_eq!(args[1], "r\u{FFFD}m");
    }

    #[test]
    fn test_parse_args_falls_back_to_scan() {
        let args = parse_args(&["host".to_string(), "rom.3ds".to_string()]);
        assert_eq!(args.content.as_deref(), Some(Path::new("rom.3ds")));
        assert_eq!(parse_args(&[]), LaunchArgs::default());
    }

    #[test]
    fn test_context_failure_code() {
        let code = run_embedded(
            FakeBinding::rejecting("no display"),
            ScriptedBackend::default(),
            FakeEngine::default(),
            HostContext::detached(),
            &["host".to_string()],
        );
        assert_eq!(code, ExitStatus::ContextFailure.code());
    }

    #[test]
    fn test_direct_rom_success_code() {
        let lib = TestLibrary::new();
        let rom = lib.add_file("Game.3ds");

        let code = run_embedded(
            FakeBinding::default(),
            ScriptedBackend::default(),
            FakeEngine::default(),
            HostContext::detached(),
            &["host".to_string(), rom.display().to_string()],
        );
        assert_eq!(code, 0);
    }

    #[test]
    fn test_panic_never_escapes() {
        let code = run_embedded(
            ExplodingBinding,
            ScriptedBackend::default(),
            FakeEngine::default(),
            HostContext::detached(),
            &["host".to_string()],
        );
        assert_eq!(code, ExitStatus::Halted.code());
    }

    #[test]
    fn test_external_main_raw_entry() {
        let lib = TestLibrary::new();
        let rom = lib.add_file("Game.3ds");
        let owned = [
            CString::new("host").unwrap(),
            CString::new(rom.display().to_string()).unwrap(),
        ];
        let ptrs: Vec<*const c_char> = owned.iter().map(|s| s.as_ptr()).collect();

        let mut window = 0u8;
        let code = unsafe {
            external_main(
                FakeBinding::default(),
                ScriptedBackend::default(),
                FakeEngine::default(),
                (&raw mut window).cast(),
                ptr::null_mut(),
                2,
                ptrs.as_ptr(),
            )
        };
        assert_eq!(code, 0);
    }
}
