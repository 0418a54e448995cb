//! Tracing subscriber setup.
//!
//! Everything the launcher prints goes to standard error as
//! `rubyexec: <message>`. Standard output is left untouched for the
//! interpreter that replaces this process.
use std::fmt::Write as _;

use tracing_subscriber::EnvFilter;

/// Environment variable holding [`EnvFilter`] directives for diagnostics.
pub const LOG_ENV: &str = "RUBYEXEC_LOG";

/// Directive used when [`LOG_ENV`] is unset or invalid.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Prefix for every line written by the launcher.
const PREFIX: &str = "rubyexec";

/// Splits a [`tracing::Event`] into its `message` and remaining
/// `key=value` fields.
#[derive(Default)]
struct MessageExtractor {
    message: String,
    fields: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] producing launcher-style lines.
///
/// Errors and warnings are printed bare, since they are the messages users
/// act on. Lower levels carry a level tag and their structured fields.
struct LauncherFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for LauncherFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let MessageExtractor { message, fields } = extractor;

        match *event.metadata().level() {
            tracing::Level::ERROR | tracing::Level::WARN => {
                writeln!(writer, "{PREFIX}: {message}{fields}")
            }
            tracing::Level::INFO => writeln!(writer, "{PREFIX}: [info] {message}{fields}"),
            _ => writeln!(writer, "{PREFIX}: [debug] {message}{fields}"),
        }
    }
}

/// Build the console filter from `directives`, falling back to
/// [`DEFAULT_DIRECTIVE`] when they are missing or unparseable.
fn console_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initialise the global [`tracing`] subscriber.
///
/// Verbosity comes from [`LOG_ENV`]; by default only warnings and errors
/// are shown. Must be called once at startup, before any logging.
pub fn init_subscriber() {
    let directives = std::env::var(LOG_ENV).ok();
    tracing_subscriber::fmt()
        .event_format(LauncherFormatter)
        .with_writer(std::io::stderr)
        .with_env_filter(console_filter(directives.as_deref()))
        .init();
}
