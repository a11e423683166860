use std::env;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;

use serde::Deserialize;
use tracing::error;

use crate::constants::DEFAULT_HTTP_TIMEOUT;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub rest_api: RestApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestApiConfig {
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Route the application is sent to when the session cannot be recovered.
    pub login_route: String,
    /// Path of the durable credential file.
    pub storage_path: String,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"rest_api\":{},\"session\":{}}}",
            self.rest_api, self.session
        )
    }
}

impl fmt::Display for RestApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"base_url\":\"{}\",\"timeout\":{}}}",
            self.base_url, self.timeout
        )
    }
}

impl fmt::Display for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"login_route\":\"{}\",\"storage_path\":\"{}\"}}",
            self.login_route, self.storage_path
        )
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            rest_api: RestApiConfig {
                base_url: get_env_or_default(
                    "GALA_REST_BASE_URL",
                    String::from("https://api.galaplanner.com/v1"),
                ),
                timeout: get_env_or_default("GALA_REST_TIMEOUT", DEFAULT_HTTP_TIMEOUT),
            },
            session: SessionConfig {
                login_route: get_env_or_default("GALA_LOGIN_ROUTE", String::from("/login")),
                storage_path: get_env_or_default(
                    "GALA_CREDENTIALS_PATH",
                    String::from(".gala/credentials.json"),
                ),
            },
        }
    }

    /// Config pointing at an arbitrary origin, keeping the default session
    /// settings. Handy for tests and local backends.
    pub fn with_base_url(base_url: &str) -> Self {
        let mut config = Config::new();
        config.rest_api.base_url = base_url.to_string();
        config
    }
}
