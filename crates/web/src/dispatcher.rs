//! Maps an inbound request onto the station and journey operations.

use std::{collections::HashMap, str::FromStr, sync::Arc};

use axum::http::Method;
use bikeshare::{client::Client, database::Database, RequestError, RequestResult};
use model::station::Station;

use crate::{common::ApiResponse, rate_limit::RateLimiter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Stations,
    Journeys,
}

impl Resource {
    pub fn name(self) -> &'static str {
        match self {
            Self::Stations => "stations",
            Self::Journeys => "journeys",
        }
    }

    fn allowed_methods(self) -> &'static str {
        match self {
            Self::Stations => "GET and POST",
            Self::Journeys => "GET",
        }
    }
}

impl FromStr for Resource {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stations" => Ok(Self::Stations),
            "journeys" => Ok(Self::Journeys),
            other => Err(RequestError::UnknownResource(other.to_owned())),
        }
    }
}

/// The `api` and `id` query parameters after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiQuery {
    pub resource: Resource,
    /// Zero when no id was given.
    pub id: i32,
}

impl ApiQuery {
    pub fn parse(params: &HashMap<String, String>) -> RequestResult<Self> {
        let id = match params.get("id").map(|id| id.trim()) {
            None | Some("") => 0,
            Some(raw) => match raw.parse::<i32>() {
                Ok(id) if id > 0 => id,
                _ => {
                    return Err(RequestError::validation(format!(
                        "{} is an invalid ID",
                        raw
                    )))
                }
            },
        };

        let resource = match params.get("api").map(|api| api.trim()) {
            None | Some("") => {
                return Err(RequestError::validation(
                    "missing required query parameter: api",
                ))
            }
            Some(api) => api.parse()?,
        };

        Ok(Self { resource, id })
    }
}

/// Routes requests to the [`Client`], at most one request per cooldown
/// interval of the rate limiter.
#[derive(Clone)]
pub struct Dispatcher<D>
where
    D: Database + 'static,
{
    client: Client<D>,
    limiter: Arc<dyn RateLimiter>,
}

impl<D> Dispatcher<D>
where
    D: Database,
{
    pub fn new(client: Client<D>, limiter: Arc<dyn RateLimiter>) -> Self {
        Self { client, limiter }
    }

    pub async fn dispatch(
        &self,
        method: &Method,
        params: &HashMap<String, String>,
        body: &str,
    ) -> RequestResult<ApiResponse> {
        if !self.limiter.try_acquire() {
            log::warn!("rejected {} request: rate limit", method);
            return Err(RequestError::RateLimited {
                interval: self.limiter.interval(),
            });
        }

        let query = ApiQuery::parse(params).map_err(|why| {
            log::info!("rejected {} request: {}", method, why);
            why
        })?;

        match query.resource {
            Resource::Stations if *method == Method::GET => {
                if query.id == 0 {
                    self.client.get_stations().await.map(ApiResponse::Stations)
                } else {
                    self.client
                        .get_station(query.id)
                        .await
                        .map(ApiResponse::Station)
                }
            }
            Resource::Stations if *method == Method::POST => {
                let station: Station = serde_json::from_str(body).map_err(|why| {
                    RequestError::validation(format!("invalid request body: {}", why))
                })?;
                self.client
                    .create_station(station)
                    .await
                    .map(|()| ApiResponse::StationCreated)
            }
            Resource::Journeys if *method == Method::GET => self
                .client
                .get_journeys(query.id)
                .await
                .map(ApiResponse::Journeys),
            resource => Err(RequestError::MethodNotAllowed {
                resource: resource.name().to_owned(),
                allowed: resource.allowed_methods(),
            }),
        }
    }
}
