//! Error types for the launcher.
//!
//! Every failure is fatal. Internal code returns [`DispatchError`] and the
//! binary maps it to a process exit status in exactly one place, via
//! [`DispatchError::exit_code`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit status for usage mistakes: bad arity, help requested or an
/// unreadable implementation list.
pub const EXIT_USAGE: u8 = 2;

/// Exit status for every other fatal condition.
pub const EXIT_FAILURE: u8 = 1;

/// A fatal condition that stops the launcher before (or instead of)
/// replacing the process.
///
/// The `Display` text is the user-visible message without the `rubyexec: `
/// prefix, which the log formatter adds.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Fewer than two invocation arguments were supplied.
    #[error("Invalid number of arguments.")]
    InvalidArgumentCount,

    /// `-h` or `--help` was given in place of the implementation list.
    #[error("Usage: {program} impl,... [args]")]
    Usage {
        /// How the launcher was invoked (its argument 0).
        program: String,
    },

    /// The implementation list argument could not be read.
    #[error("Invalid arguments: {0}")]
    MalformedArguments(String),

    /// No catalog implementation survived filtering of the requested list.
    #[error("No valid implementations found.")]
    NoValidImplementations,

    /// A symlink could not be resolved.
    #[error("Failed to resolve {}: {source}", .path.display())]
    Resolve {
        /// The link that was being resolved.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// A symlink resolved to a path longer than the launcher accepts.
    #[error("Resolved path of {} is too long.", .path.display())]
    PathTooLong {
        /// The link whose target was too long.
        path: PathBuf,
    },

    /// The host's current selection is not requested and autopick is off.
    #[error("Script does not support currently selected Ruby implementation.")]
    Unsupported,

    /// Autopick found none of the requested implementations on disk.
    #[error("No usable implementations found.")]
    NoUsableImplementation,

    /// Replacing the process image failed.
    #[error("{} failed to execute: {source}", .target.display())]
    Exec {
        /// The program that could not be executed.
        target: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Memory for the new argument vector could not be reserved.
    #[error("Unable to allocate memory: {0}")]
    Allocation(#[from] std::collections::TryReserveError),
}

impl DispatchError {
    /// Process exit status the binary reports for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgumentCount | Self::Usage { .. } | Self::MalformedArguments(_) => {
                EXIT_USAGE
            }
            _ => EXIT_FAILURE,
        }
    }
}
