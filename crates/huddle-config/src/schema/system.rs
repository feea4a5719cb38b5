//! Logging configuration types.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Filter directive for the `huddle` crates at this level.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Trace => "huddle=trace",
            Self::Debug => "huddle=debug",
            Self::Info => "huddle=info",
            Self::Warn => "huddle=warn",
            Self::Error => "huddle=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
