use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}' (text, json)", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

/// Logging configuration
///
/// ```toml
/// [logging]
/// level = "info"
/// format = "json"
///
/// [logging.targets]
/// dnsdig_infrastructure = "debug"
/// sqlx = "warn"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (default: "info")
    /// Options: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Per-module levels, keyed by tracing target (crate or module path)
    #[serde(default)]
    pub targets: BTreeMap<String, String>,
}

impl LoggingConfig {
    /// Filter directives in `EnvFilter` syntax: the global level first,
    /// then one `target=level` per entry, e.g. `info,sqlx=warn`.
    pub fn directives(&self) -> String {
        let mut directives = self.level.trim().to_ascii_lowercase();
        for (target, level) in &self.targets {
            directives.push(',');
            directives.push_str(target.trim());
            directives.push('=');
            directives.push_str(&level.trim().to_ascii_lowercase());
        }
        directives
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            targets: BTreeMap::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
