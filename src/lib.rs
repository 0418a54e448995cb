//! Ruby implementation launcher.
//!
//! A script declares the Ruby implementations it supports, e.g. with a
//! shebang of `#!/usr/bin/rubyexec ruby27,ruby31,--autopick`. The launcher
//! checks which implementation the `ruby` symlink beside it currently
//! selects, falls back to another requested implementation when allowed,
//! and replaces itself with the chosen interpreter.
//!
//! - **[`catalog`]**: known implementations and the parsed request
//! - **[`cli`]**: invocation parsing
//! - **[`dispatch`]**: current-selection discovery and target choice
//! - **[`exec`]**: argument vector and process replacement
//! - **[`platform`]**: the filesystem seam
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]
// Generated mocks carry no docs.
#![cfg_attr(test, allow(missing_docs))]

pub mod catalog;
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;

pub use dispatch::run;
pub use error::DispatchError;
