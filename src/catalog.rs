//! Known Ruby implementations and the caller's requested subset.
use std::ffi::OsStr;

use crate::error::DispatchError;

/// Every implementation the launcher recognises, oldest first.
///
/// Adding an implementation requires a rebuild.
pub const IMPLEMENTATIONS: &[&str] = &[
    "ruby18", "ruby19", "ruby20", "ruby21", "ruby22", "ruby23", "ruby24", "ruby25", "ruby26",
    "ruby27", "ruby30", "ruby31", "ruby32", "jruby", "rbx",
];

/// Name of the sibling symlink that points at the host's current selection.
pub const SELECTOR_LINK: &str = "ruby";

/// Token in the implementation list that enables fallback to any available
/// requested implementation.
pub const AUTOPICK: &str = "--autopick";

/// Look up `name` in [`IMPLEMENTATIONS`], returning the catalog's own copy.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static str> {
    IMPLEMENTATIONS.iter().copied().find(|known| *known == name)
}

/// The implementations a script declared it supports, in priority order.
///
/// Always holds at least one catalog entry and never holds duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedImplementations {
    names: Vec<&'static str>,
    autopick: bool,
}

impl RequestedImplementations {
    /// Build the request from the comma-separated tokens of the
    /// implementation list.
    ///
    /// `--autopick` sets the autopick flag. Repeated names keep their first
    /// position. Names missing from the catalog, including empty tokens and
    /// tokens that are not UTF-8, are dropped without complaint.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoValidImplementations`] if no catalog name
    /// remains.
    pub fn from_tokens<I, T>(tokens: I) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<OsStr>,
    {
        let mut names = Vec::new();
        let mut autopick = false;

        for token in tokens {
            let Some(token) = token.as_ref().to_str() else {
                continue;
            };
            if token == AUTOPICK {
                autopick = true;
            } else if let Some(name) = lookup(token)
                && !names.contains(&name)
            {
                names.push(name);
            }
        }

        if names.is_empty() {
            return Err(DispatchError::NoValidImplementations);
        }

        Ok(Self { names, autopick })
    }

    /// Requested names in priority order.
    #[must_use]
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Whether fallback to another requested implementation is allowed.
    #[must_use]
    pub const fn autopick(&self) -> bool {
        self.autopick
    }

    /// Whether `name` is one of the requested implementations.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|requested| *requested == name)
    }
}
