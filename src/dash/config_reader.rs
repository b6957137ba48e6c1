use crate::dash::*;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TITLE: &str = "Exposcore";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;
pub const DEFAULT_MAX_CHARS_PER_LINE: usize = 20;

/// The settings of the dashboard. Credentials are never read from this file.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub title: Option<String>,
    /// The location of the criteria file. `{user}` is replaced by the user name.
    #[serde(rename = "sourceUrl")]
    pub source_url: Option<String>,
    #[serde(rename = "timeoutSeconds")]
    pub timeout_seconds: Option<u64>,
    #[serde(rename = "cacheTtlSeconds")]
    pub cache_ttl_seconds: Option<u64>,
    #[serde(rename = "maxCharsPerLine")]
    pub max_chars_per_line: Option<usize>,
}

impl DashboardConfig {
    pub fn title(&self) -> String {
        self.title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    pub fn timeout(&self) -> DashResult<Duration> {
        match self.timeout_seconds {
            Some(0) => whatever!("timeoutSeconds must be at least 1"),
            Some(x) => Ok(Duration::from_secs(x)),
            None => Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS)),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds.unwrap_or(DEFAULT_CACHE_TTL_SECONDS))
    }

    pub fn max_chars_per_line(&self) -> DashResult<usize> {
        match self.max_chars_per_line {
            Some(0) => whatever!("maxCharsPerLine must be at least 1"),
            Some(x) => Ok(x),
            None => Ok(DEFAULT_MAX_CHARS_PER_LINE),
        }
    }

    /// Command line options take precedence over the file.
    pub fn merge_args(self, args: &Args) -> DashboardConfig {
        DashboardConfig {
            title: args.title.clone().or(self.title),
            source_url: args.url.clone().or(self.source_url),
            timeout_seconds: args.timeout.or(self.timeout_seconds),
            cache_ttl_seconds: self.cache_ttl_seconds,
            max_chars_per_line: args.max_chars_per_line.or(self.max_chars_per_line),
        }
    }
}

pub fn read_config(path: &str) -> DashResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config: DashboardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    info!("read_config: {:?}", config);
    Ok(config)
}
