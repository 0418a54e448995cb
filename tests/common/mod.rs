// Shared helpers for integration tests.
//
// Builds a throwaway launcher directory: a `bin/` holding the launcher, the
// `ruby` selector link and any number of fake implementations. Fake
// implementations are shell scripts that print their `$0` and arguments one
// per line, so a test can see exactly what was executed and with what.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fs;
use std::io::Write as _;
use std::os::unix::fs::OpenOptionsExt as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serializes tests that write executables or spawn processes, so no child
/// forked by one test inherits a writable descriptor to another test's
/// executable (which would make `exec` fail with `ETXTBSY`).
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

/// Take the process-spawning lock for the rest of the test.
pub fn spawn_lock() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Script body for a fake implementation.
const ECHO_SCRIPT: &str = "#!/bin/sh\nprintf '%s\\n' \"$0\" \"$@\"\n";

/// An isolated launcher directory backed by a [`tempfile::TempDir`].
///
/// Lives under `CARGO_TARGET_TMPDIR` so the built launcher can be hard
/// linked into it.
pub struct Layout {
    /// Temporary root; `bin/` lives directly beneath it.
    pub root: tempfile::TempDir,
}

impl Layout {
    /// Create an empty `bin/` directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir_in(env!("CARGO_TARGET_TMPDIR")).expect("create temp dir");
        fs::create_dir_all(root.path().join("bin")).expect("create bin dir");
        Self { root }
    }

    /// Directory holding the launcher and implementations.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    /// `bin_dir` with symlinks resolved, as the launcher sees it.
    pub fn real_bin_dir(&self) -> PathBuf {
        fs::canonicalize(self.bin_dir()).expect("canonicalize bin dir")
    }

    /// Path of the launcher inside `bin/`.
    pub fn launcher(&self) -> PathBuf {
        self.bin_dir().join("rubyexec")
    }

    /// Point the `ruby` selector link at `target`.
    pub fn with_selection(self, target: impl AsRef<Path>) -> Self {
        std::os::unix::fs::symlink(target, self.bin_dir().join("ruby"))
            .expect("create selector link");
        self
    }

    /// Add a fake implementation named `name` that echoes its arguments.
    pub fn with_implementation(self, name: &str) -> Self {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(0o755)
            .open(self.bin_dir().join(name))
            .expect("create implementation");
        file.write_all(ECHO_SCRIPT.as_bytes())
            .expect("write implementation");
        self
    }

    /// Add a file named `name` that exists but cannot be executed.
    pub fn with_broken_implementation(self, name: &str) -> Self {
        fs::write(self.bin_dir().join(name), "not a program").expect("write implementation");
        self
    }

    /// Add a placeholder launcher plus a symlink to it that stands in for
    /// `/proc/self/exe`, and return that symlink.
    pub fn fake_self_link(&self) -> PathBuf {
        fs::write(self.launcher(), "").expect("write placeholder launcher");
        let link = self.root.path().join("self");
        std::os::unix::fs::symlink(self.launcher(), &link).expect("create self link");
        link
    }

    /// Install the real launcher binary into `bin/`.
    pub fn with_launcher(self) -> Self {
        let built = Path::new(env!("CARGO_BIN_EXE_rubyexec"));
        if fs::hard_link(built, self.launcher()).is_err() {
            fs::copy(built, self.launcher()).expect("copy launcher");
        }
        self
    }
}
