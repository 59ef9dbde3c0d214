use std::{error::Error, fmt, time::Duration};

use crate::database::DatabaseError;

pub mod client;
pub mod database;
pub mod filter;
pub mod memory;
pub mod pagination;
pub mod validator;

#[derive(Debug)]
pub enum RequestError {
    /// A malformed or missing parameter, or a request body that can not be used.
    Validation(String),
    /// A new station collides with stored stations, one message per field.
    Conflicts(Vec<String>),
    /// Another request was served less than `interval` ago.
    RateLimited { interval: Duration },
    NotFound(String),
    UnknownResource(String),
    MethodNotAllowed {
        resource: String,
        allowed: &'static str,
    },
    Storage {
        message: String,
        source: Box<dyn Error + Send + Sync>,
    },
}

impl RequestError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wraps a storage failure. The message is meant for the caller, the
    /// source is only logged.
    pub fn storage(message: impl Into<String>, why: DatabaseError) -> Self {
        let message = message.into();
        log::error!("{}: {}", message, why);
        Self::Storage {
            message,
            source: Box::new(why),
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(message) | Self::NotFound(message) => {
                f.write_str(message)
            }
            Self::Conflicts(conflicts) => f.write_str(&conflicts.join(", ")),
            Self::RateLimited { interval } => write!(
                f,
                "please wait {} before making another request",
                human_interval(*interval)
            ),
            Self::UnknownResource(api) => write!(
                f,
                "{} api does not exist, try stations or journeys.",
                api
            ),
            Self::MethodNotAllowed { resource, allowed } => write!(
                f,
                "only {} method is allowed for {} api",
                allowed, resource
            ),
            Self::Storage { message, .. } => f.write_str(message),
        }
    }
}

fn human_interval(interval: Duration) -> String {
    let millis = interval.as_millis();
    match millis {
        1000 => "1 second".to_owned(),
        _ if millis % 1000 == 0 => format!("{} seconds", millis / 1000),
        1 => "1 millisecond".to_owned(),
        _ => format!("{} milliseconds", millis),
    }
}

impl Error for RequestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
