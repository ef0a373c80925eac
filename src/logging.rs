//! Log output redaction.
//!
//! Wraps the stderr writer used by `tracing-subscriber` so that Telegram bot tokens never
//! reach the logs, including inside request URLs printed by `teloxide` errors.

// lazy_regex! validates the patterns at compile time
#![allow(clippy::non_std_lazy_statics)]

use lazy_regex::lazy_regex;
use std::io::{self, Write};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Token inside a Bot API URL: `https://api.telegram.org/bot<token>/method`
static RE_TOKEN_URL: lazy_regex::Lazy<regex::Regex> =
    lazy_regex!(r"(https?://[^/]+/bot)([0-9]+:[A-Za-z0-9_-]+)(/['\s]*)");

/// Bare token: `<bot id>:<35 char secret>`
static RE_TOKEN_BARE: lazy_regex::Lazy<regex::Regex> =
    lazy_regex!(r"([0-9]{8,10}:[A-Za-z0-9_-]{35})");

/// Token prefixed with `bot`
static RE_TOKEN_PREFIXED: lazy_regex::Lazy<regex::Regex> =
    lazy_regex!(r"(bot[0-9]{8,10}:)[A-Za-z0-9_-]+");

/// Replace every Telegram token in `input` with a placeholder.
#[must_use]
pub fn redact(input: &str) -> String {
    let output = RE_TOKEN_URL.replace_all(input, "$1[TELEGRAM_TOKEN]$3");
    let output = RE_TOKEN_BARE.replace_all(&output, "[TELEGRAM_TOKEN]");
    RE_TOKEN_PREFIXED
        .replace_all(&output, "$1[TELEGRAM_TOKEN]")
        .into_owned()
}

/// Writer that redacts tokens before forwarding to `inner`.
pub struct RedactingWriter<W: Write> {
    inner: W,
}

impl<W: Write> RedactingWriter<W> {
    /// Wrap `inner`.
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.inner.write_all(redact(&s).as_bytes())?;
        // Report the original length; the redacted text may be shorter or longer.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// `MakeWriter` producing a [`RedactingWriter`] per log event.
pub struct RedactingMakeWriter<F> {
    make_inner: F,
}

impl<F> RedactingMakeWriter<F> {
    /// Wrap a writer factory such as `io::stderr`.
    pub const fn new(make_inner: F) -> Self {
        Self { make_inner }
    }
}

impl<'a, F, W> tracing_subscriber::fmt::MakeWriter<'a> for RedactingMakeWriter<F>
where
    F: Fn() -> W + 'static,
    W: Write,
{
    type Writer = RedactingWriter<W>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new((self.make_inner)())
    }
}

/// Default filter directives. `debug_mode` raises everything to `debug`.
#[must_use]
pub fn default_directives(debug_mode: bool) -> &'static str {
    if debug_mode {
        "debug"
    } else {
        "tiktok_batch_bot=info,teloxide=warn,hyper=warn,h2=error,reqwest=warn,tokio=warn"
    }
}

/// Install the global subscriber writing redacted output to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `DEBUG_MODE=true|1` selects verbose output.
pub fn init_logging() {
    let debug_mode = std::env::var("DEBUG_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug_mode)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(RedactingMakeWriter::new(io::stderr)))
        .init();
}
