use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

/// Console logging options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// **Environment variable**: `CHIRPER_LOGGING_STYLE`
    ///
    /// One of `compact`, `full`, `pretty` or `json`. Defaults to `compact`.
    pub style: LoggingStyle,

    /// **Environment variable**: `CHIRPER_LOGGING_TARGETS`
    ///
    /// Filter directives in the [`tracing_subscriber::EnvFilter`] syntax,
    /// for example `info,chirper::db=debug`. Defaults to `info`.
    pub targets: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            style: LoggingStyle::default(),
            targets: "info".into(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LoggingStyle {
    #[default]
    Compact,
    Full,
    Pretty,
    Json,
}

#[derive(Debug, Error)]
#[error("unknown logging style {0:?}, expected compact, full, pretty or json")]
pub struct InvalidLoggingStyle(String);

impl FromStr for LoggingStyle {
    type Err = InvalidLoggingStyle;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("compact") {
            Ok(Self::Compact)
        } else if value.eq_ignore_ascii_case("full") {
            Ok(Self::Full)
        } else if value.eq_ignore_ascii_case("pretty") {
            Ok(Self::Pretty)
        } else if value.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(InvalidLoggingStyle(value.to_string()))
        }
    }
}

impl TryFrom<String> for LoggingStyle {
    type Error = InvalidLoggingStyle;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
