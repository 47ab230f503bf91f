use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub api_rps: u32,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8000"),
            database_url: get_env("DATABASE_URL")?,
            database_max_connections: get_env_parse_or("DATABASE_MAX_CONNECTIONS", 20)?,
            api_rps: get_env_parse_or("API_RPS", 100)?,
            log_format: parse_log_format(env::var("LOG_FORMAT").ok().as_deref())?,
        })
    }
}

fn parse_log_format(raw: Option<&str>) -> Result<LogFormat> {
    match raw.map(str::trim) {
        None | Some("") | Some("pretty") => Ok(LogFormat::Pretty),
        Some("json") => Ok(LogFormat::Json),
        Some(other) => Err(Error::Config(format!(
            "Invalid value for LOG_FORMAT: {} (expected pretty or json)",
            other
        ))),
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_defaults_to_pretty() {
        assert_eq!(parse_log_format(None).unwrap(), LogFormat::Pretty);
        assert_eq!(parse_log_format(Some("")).unwrap(), LogFormat::Pretty);
        assert_eq!(parse_log_format(Some("json")).unwrap(), LogFormat::Json);
    }

    #[test]
    fn unknown_log_format_is_a_config_error() {
        let err = parse_log_format(Some("xml")).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("LOG_FORMAT")));
    }
}
