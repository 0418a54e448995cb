//! Process replacement.
use std::convert::Infallible;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::DispatchError;

/// A fully decided launch: the program to run and its complete argument
/// vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    target: PathBuf,
    argv: Vec<OsString>,
}

impl Launch {
    /// Build the argument vector for `target`.
    ///
    /// Argument 0 is the target path itself, followed by `forwarded` in
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Allocation`] if the vector cannot be
    /// reserved.
    pub fn new(target: PathBuf, forwarded: &[OsString]) -> Result<Self, DispatchError> {
        let mut argv = Vec::new();
        argv.try_reserve_exact(forwarded.len() + 1)?;
        argv.push(target.clone().into_os_string());
        argv.extend_from_slice(forwarded);
        Ok(Self { target, argv })
    }

    /// The program that will replace this process.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Complete argument vector, argument 0 included.
    #[must_use]
    pub fn argv(&self) -> &[OsString] {
        &self.argv
    }

    /// Replace the current process image with the target, inheriting the
    /// environment.
    ///
    /// Only returns if replacement failed.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Exec`] carrying the OS error.
    #[cfg(unix)]
    pub fn exec(self) -> Result<Infallible, DispatchError> {
        use std::os::unix::process::CommandExt as _;
        use std::process::Command;

        let mut cmd = Command::new(&self.target);
        if let Some((arg0, rest)) = self.argv.split_first() {
            cmd.arg0(arg0).args(rest);
        }
        let source = cmd.exec();
        Err(DispatchError::Exec {
            target: self.target,
            source,
        })
    }

    /// Process replacement is unavailable on this host.
    ///
    /// # Errors
    ///
    /// Always returns [`DispatchError::Exec`].
    #[cfg(not(unix))]
    pub fn exec(self) -> Result<Infallible, DispatchError> {
        Err(DispatchError::Exec {
            target: self.target,
            source: std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "process replacement requires a Unix host",
            ),
        })
    }
}
