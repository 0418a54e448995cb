//! Invocation parsing.
//!
//! The launcher owns only its first real argument, the comma-separated
//! implementation list. Everything after it belongs to the interpreter and
//! is forwarded byte-for-byte, so only the program name and that list are
//! ever shown to [`clap`].
use std::ffi::{OsStr, OsString};

use clap::Parser;

use crate::catalog::RequestedImplementations;
use crate::error::DispatchError;

/// The launcher's own arguments.
#[derive(Parser, Debug)]
#[command(
    name = "rubyexec",
    about = "Run a script with a Ruby implementation it supports",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Comma-separated implementations the script supports, optionally
    /// including --autopick
    #[arg(
        value_name = "IMPL,...",
        required = true,
        value_delimiter = ',',
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(OsString)
    )]
    pub implementations: Vec<OsString>,
}

/// A parsed launcher invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Implementations the script accepts.
    pub requested: RequestedImplementations,
    /// Arguments for the interpreter, in their original order.
    pub forwarded: Vec<OsString>,
}

/// Returns `true` if `arg` asks for the usage message.
fn is_help(arg: &OsStr) -> bool {
    arg == "-h" || arg == "--help"
}

/// Parse the full argument list, including the program name.
///
/// # Errors
///
/// - [`DispatchError::InvalidArgumentCount`] when the implementation list is
///   missing.
/// - [`DispatchError::Usage`] when the list is `-h` or `--help`.
/// - [`DispatchError::MalformedArguments`] when clap rejects the list.
/// - [`DispatchError::NoValidImplementations`] when no catalog name remains.
pub fn parse(args: &[OsString]) -> Result<Invocation, DispatchError> {
    let [program, list, forwarded @ ..] = args else {
        return Err(DispatchError::InvalidArgumentCount);
    };

    if is_help(list) {
        return Err(DispatchError::Usage {
            program: program.to_string_lossy().into_owned(),
        });
    }

    // The list is always a positional value, even when it looks like a flag
    // or is clap's own `--` escape.
    let clap_args = [program.as_os_str(), OsStr::new("--"), list.as_os_str()];
    let cli = Cli::try_parse_from(clap_args).map_err(|e| {
        DispatchError::MalformedArguments(
            e.kind()
                .as_str()
                .unwrap_or("unreadable implementation list")
                .to_string(),
        )
    })?;

    Ok(Invocation {
        requested: RequestedImplementations::from_tokens(&cli.implementations)?,
        forwarded: forwarded.to_vec(),
    })
}
