use crate::parser::{LogFormat, ParseOptions, QueryMode};
use clap::{Parser, ValueEnum};

/// Verbosity of the stderr diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Line layout selector, mirrored into the parser's `LogFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatArg {
    /// Nine fields, ending at the response size.
    Simple,
    /// Simple plus quoted referer and user-agent.
    #[default]
    Combined,
}

impl From<FormatArg> for LogFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Simple => LogFormat::Simple,
            FormatArg::Combined => LogFormat::Combined,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Access-log files to read in order; `-` or no files reads standard input
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Emit the query string raw instead of decoding it into a map
    #[arg(long)]
    pub no_query: bool,

    /// Report malformed lines on stderr and keep going
    #[arg(long)]
    pub skip_errors: bool,

    /// Expected line layout
    #[arg(long, env = "HTTP_LOG_FORMAT", default_value = "combined")]
    pub format: FormatArg,

    /// Diagnostic log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Config::parse_from(args)
    }

    /// Parser configuration implied by the flags.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            format: self.format.into(),
            query_mode: if self.no_query {
                QueryMode::Raw
            } else {
                QueryMode::Structured
            },
        }
    }
}
