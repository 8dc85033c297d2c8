//! Signal handling for graceful shutdown.
//!
//! A Ctrl+C handler flips a shared `AtomicBool`. The scanner and the
//! grouper poll it between items and the report pipeline checks it between
//! formats, so an interrupted run stops at the next boundary and the user
//! gets a clean "interrupted" message instead of a half-printed panic.
//! Report files written before the interruption are kept as they are.
//!
//! # Usage
//!
//! ```rust,no_run
//! use mediadupe::signal::install_handler;
//!
//! let handler = install_handler().expect("Failed to install signal handler");
//! let flag = handler.get_flag();
//! // Pass `flag` to Scanner::with_shutdown_flag, NameGrouper::with_shutdown_flag, ...
//! if handler.is_shutdown_requested() {
//!     println!("Stopping");
//! }
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared shutdown flag.
#[derive(Debug, Clone)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a new shutdown handler with the flag initially set to `false`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if shutdown has been requested.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Get a clone of the shutdown flag for the scanner and grouper.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Reset the shutdown flag to `false`.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl Default for ShutdownHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install a Ctrl+C handler that sets the shutdown flag on interrupt.
///
/// Calling this again (for example from several `run_app` calls in one
/// test process) returns the already installed handler with its flag reset.
/// If another hook already owns Ctrl+C, an unhooked handler is returned;
/// its flag can still be raised through [`ShutdownHandler::get_flag`].
///
/// # Errors
///
/// Currently always succeeds; the `Result` leaves room for platforms where
/// installation failure should be fatal.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    match ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);

        let _ = writeln!(std::io::stderr(), "\nInterrupted. Stopping after the current step...");
        let _ = std::io::stderr().flush();

        log::info!("Shutdown signal received");
    }) {
        Ok(()) => {
            let _ = GLOBAL_HANDLER.set(handler.clone());
            Ok(handler)
        }
        Err(e) => {
            if let Some(existing) = GLOBAL_HANDLER.get() {
                existing.reset();
                Ok(existing.clone())
            } else {
                log::debug!("Ctrl+C handler not installed ({}), using unhooked handler", e);
                let fallback = ShutdownHandler::new();
                let _ = GLOBAL_HANDLER.set(fallback.clone());
                Ok(fallback)
            }
        }
    }
}
