//! Runtime settings read from the environment.

use std::{env, net::SocketAddr, time::Duration};

use bikeshare::validator::LookupErrorPolicy;

const DEFAULT_RATE_LIMIT_MS: u64 = 1000;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum time between two served requests.
    pub rate_limit: Duration,
    pub lookup_errors: LookupErrorPolicy,
    pub bind_address: SocketAddr,
    /// Run as a Lambda function instead of a standalone server.
    pub serverless: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rate_limit_ms = parse(&lookup, "RATE_LIMIT_MS", DEFAULT_RATE_LIMIT_MS)?;
        let lookup_errors =
            parse(&lookup, "VALIDATION_LOOKUP_ERRORS", LookupErrorPolicy::default())?;
        let bind_address = match lookup("BIND_ADDRESS") {
            Some(value) => parse_value("BIND_ADDRESS", value)?,
            None => parse_value("BIND_ADDRESS", DEFAULT_BIND_ADDRESS.to_owned())?,
        };

        Ok(Self {
            rate_limit: Duration::from_millis(rate_limit_ms),
            lookup_errors,
            bind_address,
            serverless: lookup("AWS_LAMBDA_RUNTIME_API").is_some(),
        })
    }
}

fn parse<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: ToString,
{
    match lookup(name) {
        Some(value) => parse_value(name, value),
        None => Ok(default),
    }
}

fn parse_value<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: ToString,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|why| ConfigError::Invalid {
        name,
        reason: why.to_string(),
        value,
    })
}
