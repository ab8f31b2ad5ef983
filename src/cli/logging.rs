// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Console output macros.
//!
//! `verbose!`, `section!` and `frame!` only print when verbose output is on; it starts off
//! and the `--verbose` flag turns it on.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::pipeline::FrameStats;

/// Global verbosity flag.
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set the global verbosity flag.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Check if verbose output is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// "1 person", "3 people".
#[must_use]
pub fn people(count: usize) -> String {
    if count == 1 {
        "1 person".to_string()
    } else {
        format!("{count} people")
    }
}

/// One progress line for frame `index` (0-based), numbered from 1.
#[must_use]
pub fn frame_line(index: u64, stats: &FrameStats) -> String {
    format!(
        "frame {}: {}, interval {:.1}ms, inference {:.1}ms",
        index + 1,
        people(stats.people),
        stats.interval_ms,
        stats.inference_ms
    )
}

/// Macro for standard info messages.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        println!("{}", format!($($arg)*));
    }
}

/// Macro for warning messages.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        use colored::Colorize;
        eprintln!("{} {}", "WARNING ⚠️".yellow().bold(), format!($($arg)*));
    }
}

/// Macro for error messages.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        use colored::Colorize;
        eprintln!("{} {}", "Error:".red().bold(), format!($($arg)*));
    }
}

/// Macro for success messages.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        use colored::Colorize;
        println!("{} {}", "✅".green(), format!($($arg)*));
    }
}

/// Macro for verbose messages.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::cli::logging::is_verbose() {
            println!("{}", format!($($arg)*));
        }
    }
}

/// Macro for per-frame progress, printed in verbose mode.
#[macro_export]
macro_rules! frame {
    ($index:expr, $stats:expr) => {
        if $crate::cli::logging::is_verbose() {
            println!("{}", $crate::cli::logging::frame_line($index, &$stats));
        }
    };
}

/// Macro for section headers.
#[macro_export]
macro_rules! section {
    ($($arg:tt)*) => {
        use colored::Colorize;
        if $crate::cli::logging::is_verbose() {
            println!();
            println!("{}", format!($($arg)*).cyan().bold());
        }
    }
}
