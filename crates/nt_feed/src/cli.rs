use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Args;
use nt_core::{ConnectionClass, Error, Result};
use nt_device::{ProbeConfig, ProbeKind};

use crate::client::{NewsDataClient, DEFAULT_BASE_URL};

const TOO_LARGE: &str = "Duration too large";

/// Duration written as `30s`, `2m`, `1m30s` or plain seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_millis = 0u64;
        let mut current_number = String::new();
        let mut has_value = false;
        let mut chars = s.trim().chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                current_number.push(c);
                continue;
            }
            if c.is_whitespace() {
                continue;
            }
            let num = current_number
                .parse::<u64>()
                .map_err(|_| format!("Missing number before unit: {}", c))?;
            let unit = match c {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                's' => 1_000,
                'm' => 60_000,
                'h' => 3_600_000,
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            total_millis = num
                .checked_mul(unit)
                .and_then(|millis| total_millis.checked_add(millis))
                .ok_or_else(|| TOO_LARGE.to_string())?;
            current_number.clear();
            has_value = true;
        }

        // A trailing number without unit is seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_millis = num
                .checked_mul(1_000)
                .and_then(|millis| total_millis.checked_add(millis))
                .ok_or_else(|| TOO_LARGE.to_string())?;
            has_value = true;
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }
        if total_millis == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_millis(total_millis)))
    }
}

/// Provider settings. The API key is never compiled in.
#[derive(Args, Debug, Clone)]
pub struct FeedArgs {
    /// newsdata.io API key
    #[arg(long, env = "NEWSDATA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the news provider
    #[arg(long, env = "NEWSDATA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout (e.g. 15s, 1m, 500ms)
    #[arg(long, env = "NT_TIMEOUT", default_value = "15s")]
    pub timeout: HumanDuration,
}

impl FeedArgs {
    pub fn client(&self) -> Result<NewsDataClient> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::Config("An API key is required (--api-key or NEWSDATA_API_KEY)".to_string())
            })?;
        NewsDataClient::new(api_key, &self.base_url, self.timeout.0)
    }
}

/// Device probe settings.
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Device probe backend
    #[arg(long, env = "NT_PROBE", value_enum, default_value_t = ProbeKind::Sysfs)]
    pub probe: ProbeKind,

    /// Connection reported by the fixed probe (wifi, cellular, unknown, none)
    #[arg(long)]
    pub connection: Option<ConnectionClass>,

    /// Battery percentage reported by the fixed probe
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub battery: Option<u8>,
}

impl DeviceArgs {
    /// Overrides imply the fixed probe.
    pub fn probe_config(&self) -> ProbeConfig {
        let kind = if self.connection.is_some() || self.battery.is_some() {
            ProbeKind::Fixed
        } else {
            self.probe
        };
        ProbeConfig {
            kind,
            connection: self.connection,
            battery_percent: self.battery,
        }
    }
}

/// Logging settings.
#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Append logs to this file instead of stderr
    #[arg(long, env = "NT_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}
