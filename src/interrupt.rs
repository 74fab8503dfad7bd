//! User interrupt (Ctrl-C) handling.
//!
//! The handler is installed before the first prompt and behaves per phase:
//! - while prompting, there is nothing to save, so it prints the cancel
//!   notice and exits with [`INTERRUPTED_EXIT_CODE`]
//! - once scanning has started it only flips a shared flag. The scanner
//!   polls it between entries and stops early, so the run can still write
//!   reports from the partial results instead of dying mid-write.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exit status used when the run was interrupted by the user.
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Printed when the user cancels the run.
pub const CANCELLED_MESSAGE: &str = "⚠ Operação cancelada pelo usuário.";

/// What a Ctrl-C does in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalAction {
    /// Still prompting: leave the process immediately.
    Exit,
    /// Scanning: stop the walk and keep the partial results.
    Stop,
}

/// Shared interrupt state. Clones observe the same flags.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
    scanning: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the run as interrupted.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Switches from the prompt phase to the scan phase.
    pub fn begin_scan(&self) {
        self.scanning.store(true, Ordering::SeqCst);
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning.load(Ordering::SeqCst)
    }

    /// Reacts to one Ctrl-C: sets the flag once scanning, otherwise asks
    /// the caller to exit.
    pub fn on_signal(&self) -> SignalAction {
        if self.is_scanning() {
            self.trigger();
            SignalAction::Stop
        } else {
            SignalAction::Exit
        }
    }

    /// Routes Ctrl-C to this interrupt. Can only be installed once per process.
    pub fn install_ctrlc_handler(&self) -> Result<()> {
        let interrupt = self.clone();
        ctrlc::set_handler(move || {
            if interrupt.on_signal() == SignalAction::Exit {
                tracing::warn!("Operação cancelada pelo usuário");
                println!("\n\n{}", CANCELLED_MESSAGE);
                std::process::exit(i32::from(INTERRUPTED_EXIT_CODE));
            }
        })
        .context("Failed to install Ctrl-C handler")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_flag() {
        let interrupt = Interrupt::new();
        let clone = interrupt.clone();
        assert!(!clone.is_triggered());

        interrupt.trigger();
        assert!(clone.is_triggered());
    }

    #[test]
    fn test_signal_exits_while_prompting() {
        let interrupt = Interrupt::new();
        assert_eq!(interrupt.on_signal(), SignalAction::Exit);
        assert!(!interrupt.is_triggered());
    }

    #[test]
    fn test_signal_stops_scan_after_phase_switch() {
        let interrupt = Interrupt::new();
        let handler_side = interrupt.clone();

        interrupt.begin_scan();
        assert!(handler_side.is_scanning());
        assert_eq!(handler_side.on_signal(), SignalAction::Stop);
        assert!(interrupt.is_triggered());
    }
}
