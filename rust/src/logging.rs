//! Stderr tracing for the scheduling pipeline.
//!
//! `ScheduleConfig::verbosity` picks how much of a run is traced: 1 prints the
//! validation verdict and the critical paths, 2 adds every rank class, 3 adds
//! the dates and floats of each vertex. Message arguments are only evaluated
//! when their level is enabled.

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_SUMMARY: u8 = 1;
pub const VERBOSITY_PASSES: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Whether a message at `level` is printed under `verbosity`.
#[inline]
pub fn enabled(verbosity: u8, level: u8) -> bool {
    level != VERBOSITY_SILENT && verbosity >= level
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_at {
    ($level:expr, $verbosity:expr, $($arg:tt)*) => {
        if $crate::logging::enabled($verbosity, $level) {
            eprintln!($($arg)*);
        }
    };
}

/// Validation verdict, project duration, critical paths.
#[macro_export]
macro_rules! log_summary {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_SUMMARY, $verbosity, $($arg)*)
    };
}

/// One line per rank class.
#[macro_export]
macro_rules! log_passes {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_PASSES, $verbosity, $($arg)*)
    };
}

/// Per-vertex dates and floats.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_DEBUG, $verbosity, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Count how many of the three macros format their message under `verbosity`.
    fn make_trace(verbosity: u8) -> (u32, u32, u32) {
        let summary = Cell::new(0);
        let passes = Cell::new(0);
        let debug = Cell::new(0);
        log_summary!(verbosity, "{}", summary.replace(summary.get() + 1));
        log_passes!(verbosity, "{}", passes.replace(passes.get() + 1));
        log_debug!(verbosity, "{}", debug.replace(debug.get() + 1));
        (summary.get(), passes.get(), debug.get())
    }

    #[test]
    fn test_silent_run_formats_nothing() {
        assert_eq!(make_trace(VERBOSITY_SILENT), (0, 0, 0));
    }

    #[test]
    fn test_each_level_includes_the_ones_below() {
        assert_eq!(make_trace(VERBOSITY_SUMMARY), (1, 0, 0));
        assert_eq!(make_trace(VERBOSITY_PASSES), (1, 1, 0));
        assert_eq!(make_trace(VERBOSITY_DEBUG), (1, 1, 1));
        // Anything above DEBUG traces everything
        assert_eq!(make_trace(u8::MAX), (1, 1, 1));
    }

    #[test]
    fn test_silent_level_is_never_enabled() {
        assert!(!enabled(u8::MAX, VERBOSITY_SILENT));
        assert!(enabled(VERBOSITY_PASSES, VERBOSITY_SUMMARY));
        assert!(!enabled(VERBOSITY_PASSES, VERBOSITY_DEBUG));
    }
}
