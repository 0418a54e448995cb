//! Host facilities the launcher depends on.
use std::io;
use std::path::{Path, PathBuf};

/// Symlink through which the host exposes the running executable.
pub const SELF_EXE: &str = "/proc/self/exe";

/// Filesystem queries used to pick an implementation.
#[cfg_attr(test, mockall::automock)]
pub trait System {
    /// Read the target of the symlink at `path` without following further links.
    ///
    /// # Errors
    ///
    /// Returns the OS error if `path` is missing or not a symlink.
    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;

    /// Whether something exists at `path`, following symlinks.
    fn exists(&self, path: &Path) -> bool;
}

/// [`System`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostSystem;

impl System for HostSystem {
    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::read_link(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
