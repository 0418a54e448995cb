//! `rubyexec` binary: run a script under a Ruby implementation it supports.
use std::ffi::OsString;
use std::process::ExitCode;

fn main() -> ExitCode {
    rubyexec::logging::init_subscriber();
    let args: Vec<OsString> = std::env::args_os().collect();

    match rubyexec::run(&args) {
        Ok(never) => match never {},
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
