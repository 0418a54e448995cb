//! Choosing the implementation to run.
//!
//! The launcher lives in the same directory as the implementations it can
//! start. A sibling symlink named [`SELECTOR_LINK`] points at whichever
//! implementation the host currently prefers. That preference is honoured if
//! the script accepts it; otherwise, with `--autopick`, the first requested
//! implementation present in the directory is used.
use std::convert::Infallible;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::{RequestedImplementations, SELECTOR_LINK};
use crate::cli::{self, Invocation};
use crate::error::DispatchError;
use crate::exec::Launch;
use crate::platform::{HostSystem, SELF_EXE, System};

/// Resolved link targets must be strictly shorter than this many bytes.
pub const MAX_PATH_LEN: usize = 1024;

/// What the host currently has selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Directory containing the launcher and its sibling implementations.
    pub base_dir: PathBuf,
    /// Raw target of the selector link, relative to `base_dir` unless absolute.
    pub resolved: PathBuf,
}

impl Selection {
    /// Name of the selected implementation, taken from the last component of
    /// the selector link's target.
    #[must_use]
    pub fn implementation(&self) -> Option<&str> {
        self.resolved.file_name()?.to_str()
    }

    /// Path that runs the selected implementation.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        // An absolute link target replaces the base entirely.
        self.base_dir.join(&self.resolved)
    }
}

/// Picks a target for an [`Invocation`].
#[derive(Debug)]
pub struct Dispatcher<S> {
    system: S,
    self_link: PathBuf,
}

impl Dispatcher<HostSystem> {
    /// Dispatcher for the running process on the real filesystem.
    #[must_use]
    pub fn for_host() -> Self {
        Self::new(HostSystem, PathBuf::from(SELF_EXE))
    }
}

impl<S: System> Dispatcher<S> {
    /// Create a dispatcher that locates the launcher by resolving
    /// `self_link`.
    #[must_use]
    pub const fn new(system: S, self_link: PathBuf) -> Self {
        Self { system, self_link }
    }

    /// Resolve `path` as a symlink, rejecting overlong targets.
    fn resolve(&self, path: &Path) -> Result<PathBuf, DispatchError> {
        let resolved = self
            .system
            .read_link(path)
            .map_err(|source| DispatchError::Resolve {
                path: path.to_path_buf(),
                source,
            })?;

        if resolved.as_os_str().len() >= MAX_PATH_LEN {
            return Err(DispatchError::PathTooLong {
                path: path.to_path_buf(),
            });
        }
        Ok(resolved)
    }

    /// Find the launcher's directory and what its selector link points to.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Resolve`] or [`DispatchError::PathTooLong`]
    /// if either the launcher's own link or the selector link cannot be
    /// resolved.
    pub fn current_selection(&self) -> Result<Selection, DispatchError> {
        let launcher = self.resolve(&self.self_link)?;
        let base_dir = launcher
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let selector = base_dir.join(SELECTOR_LINK);
        let resolved = self.resolve(&selector)?;
        debug!(
            launcher = %launcher.display(),
            selector = %selector.display(),
            resolved = %resolved.display(),
            "resolved current selection"
        );

        Ok(Selection { base_dir, resolved })
    }

    /// Decide which program to run.
    ///
    /// The current selection wins whenever it is requested. Otherwise,
    /// with autopick, requested implementations are probed in priority
    /// order.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Unsupported`] if the selection is not requested and
    ///   autopick is off.
    /// - [`DispatchError::NoUsableImplementation`] if autopick finds nothing.
    pub fn choose_target(
        &self,
        requested: &RequestedImplementations,
        selection: &Selection,
    ) -> Result<PathBuf, DispatchError> {
        let selected = selection.implementation();
        if let Some(name) = selected
            && requested.contains(name)
        {
            debug!(implementation = name, "current selection is supported");
            return Ok(selection.path());
        }

        if !requested.autopick() {
            debug!(selected = selected.unwrap_or("<none>"), "autopick not requested");
            return Err(DispatchError::Unsupported);
        }

        requested
            .names()
            .iter()
            .map(|name| selection.base_dir.join(name))
            .find(|candidate| {
                let found = self.system.exists(candidate);
                debug!(candidate = %candidate.display(), found, "autopick probe");
                found
            })
            .ok_or(DispatchError::NoUsableImplementation)
    }

    /// Turn raw invocation arguments into a ready [`Launch`].
    ///
    /// # Errors
    ///
    /// Any parsing, resolution or selection failure.
    pub fn prepare(&self, args: &[OsString]) -> Result<Launch, DispatchError> {
        let Invocation {
            requested,
            forwarded,
        } = cli::parse(args)?;
        debug!(
            requested = ?requested.names(),
            autopick = requested.autopick(),
            "parsed implementation list"
        );

        let selection = self.current_selection()?;
        let target = self.choose_target(&requested, &selection)?;
        debug!(
            target = %target.display(),
            forwarded = forwarded.len(),
            "launching"
        );

        Launch::new(target, &forwarded)
    }
}

/// Pick an implementation for `args` and replace the current process with
/// it.
///
/// # Errors
///
/// Returns the reason no process replacement took place.
pub fn run(args: &[OsString]) -> Result<Infallible, DispatchError> {
    Dispatcher::for_host().prepare(args)?.exec()
}
