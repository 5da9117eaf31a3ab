use crate::localization::Language;
use crate::utils::formatting::mask;
use log::*;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const APP_ID: &str = "APPID";
pub const APP_SECRET: &str = "APPSECRET";
pub const RECIPIENT_ID: &str = "OPENID";
pub const TEMPLATE_ID: &str = "TEMPLATE_ID";
pub const WEATHER_API_TOKEN: &str = "CAIYUN_API_TOKEN";

const REQUIRED_VARS: [&str; 5] = [APP_ID, APP_SECRET, RECIPIENT_ID, TEMPLATE_ID, WEATHER_API_TOKEN];

pub const LANGUAGE: &str = "WEATHER_PUSH_LANG";
pub const WEATHER_API_BASE: &str = "CAIYUN_API_BASE";
pub const MESSAGING_API_BASE: &str = "WECHAT_API_BASE";
pub const HTTP_TIMEOUT: &str = "HTTP_TIMEOUT_SECS";
pub const VERBOSE_LOGGING: &str = "VERBOSE_LOGGING";

const DEFAULT_WEATHER_API_BASE: &str = "https://api.caiyunapp.com/v2.6";
const DEFAULT_MESSAGING_API_BASE: &str = "https://api.weixin.qq.com/cgi-bin";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for {key}: {reason}")]
    Invalid {
        key: &'static str,
        reason: String,
    },
}

/// String that never prints its content, neither through `Debug` nor `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);
impl Secret {
    pub fn new(value: impl Into<String>) -> Secret {
        Secret(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({})", mask(&self.0))
    }
}
impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", mask(&self.0))
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub app_id: Secret,
    pub app_secret: Secret,
    pub recipient_id: Secret,
    pub template_id: Secret,
    pub weather_api_token: Secret,
}
impl Credentials {
    pub fn log_summary(&self) {
        info!("Environment variables present:");
        let entries = [
            (APP_ID, &self.app_id),
            (APP_SECRET, &self.app_secret),
            (RECIPIENT_ID, &self.recipient_id),
            (TEMPLATE_ID, &self.template_id),
            (WEATHER_API_TOKEN, &self.weather_api_token),
        ];
        for (key, value) in entries {
            info!("  {}: {}", key, value);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub weather: String,
    pub messaging: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    pub language: Language,
    pub timeout: Duration,
    pub verbose: bool,
}
impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key-value source. Empty values count as absent.
    pub fn from_source<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS.iter()
            .copied()
            .filter(|&key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let required = |key: &'static str| get(key).map(Secret::new).ok_or(ConfigError::Missing(vec![key]));
        let credentials = Credentials {
            app_id: required(APP_ID)?,
            app_secret: required(APP_SECRET)?,
            recipient_id: required(RECIPIENT_ID)?,
            template_id: required(TEMPLATE_ID)?,
            weather_api_token: required(WEATHER_API_TOKEN)?,
        };

        let language = match get(LANGUAGE) {
            Some(value) => value.parse::<Language>()
                .map_err(|reason| ConfigError::Invalid { key: LANGUAGE, reason })?,
            None => Language::default(),
        };

        let timeout = match get(HTTP_TIMEOUT) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(seconds) if seconds > 0 => Duration::from_secs(seconds),
                _ => return Err(ConfigError::Invalid {
                    key: HTTP_TIMEOUT,
                    reason: format!("expected a positive number of seconds, got '{}'", value),
                }),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        };

        let endpoints = Endpoints {
            weather: base_url(get(WEATHER_API_BASE), DEFAULT_WEATHER_API_BASE, WEATHER_API_BASE)?,
            messaging: base_url(get(MESSAGING_API_BASE), DEFAULT_MESSAGING_API_BASE, MESSAGING_API_BASE)?,
        };

        let verbose = get(VERBOSE_LOGGING)
            .map(|b| b.trim().parse::<bool>().unwrap_or(false))
            .unwrap_or(false);

        Ok(Config { credentials, endpoints, language, timeout, verbose })
    }
}

fn base_url(value: Option<String>, default: &str, key: &'static str) -> Result<String, ConfigError> {
    let value = value.unwrap_or_else(|| default.to_string());
    url::Url::parse(&value).map_err(|e| ConfigError::Invalid { key, reason: e.to_string() })?;

    Ok(value.trim_end_matches('/').to_string())
}
