pub use crate::common::RouteResult;

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::Method,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bikeshare::{client::Client, database::Database, validator::Validator};
use common::{ApiResponse, RouteErrorResponse};
use config::Config;
use dispatcher::Dispatcher;
use rate_limit::Cooldown;
use serde_json::json;
use tokio::net::TcpListener;

pub mod common;
pub mod config;
pub mod dispatcher;
pub mod rate_limit;

#[derive(Clone)]
pub struct WebState<D>
where
    D: Database + 'static,
{
    pub dispatcher: Dispatcher<D>,
}

impl<D> WebState<D>
where
    D: Database,
{
    pub fn new(database: D, config: &Config) -> Self {
        Self {
            dispatcher: Dispatcher::new(
                Client::new(database, Validator::new(config.lookup_errors)),
                Arc::new(Cooldown::new(config.rate_limit)),
            ),
        }
    }
}

/// Every path other than `/ping` is served by the dispatcher, which selects
/// the operation from the query parameters and the method alone. The gateway
/// may forward requests under any stage or resource path.
pub fn routes<D>(state: WebState<D>) -> Router
where
    D: Database + 'static,
{
    Router::new()
        .route("/ping", get(ping))
        .fallback(api::<D>)
        .with_state(state)
}

pub async fn start_web_server(routes: Router, address: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}

/// Serves API gateway proxy events until the Lambda runtime shuts down.
pub async fn start_lambda(routes: Router) -> Result<(), lambda_http::Error> {
    lambda_http::run(routes).await
}

async fn ping() -> impl IntoResponse {
    Json(json!({
        "message": "pong!"
    }))
}

async fn api<D>(
    State(WebState { dispatcher }): State<WebState<D>>,
    method: Method,
    Query(params): Query<HashMap<String, String>>,
    body: String,
) -> RouteResult<ApiResponse>
where
    D: Database + 'static,
{
    dispatcher
        .dispatch(&method, &params, &body)
        .await
        .map_err(RouteErrorResponse::from)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use bikeshare::{memory::MemoryDatabase, validator::LookupErrorPolicy};
    use model::station::Station;
    use tower::ServiceExt;

    use super::*;

    fn test_config(rate_limit: Duration) -> Config {
        Config {
            rate_limit,
            lookup_errors: LookupErrorPolicy::Propagate,
            bind_address: "127.0.0.1:0".parse().unwrap(),
            serverless: false,
        }
    }

    fn app(database: MemoryDatabase, rate_limit: Duration) -> Router {
        routes(WebState::new(database, &test_config(rate_limit)))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_owned()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn station(id: i32, name: &str, latitude: f64) -> Station {
        Station {
            id,
            name_fi: name.to_owned(),
            name_sv: format!("{} sv", name),
            name_en: format!("{} en", name),
            address_fi: format!("{}katu 1", name),
            address_sv: format!("{}gatan 1", name),
            latitude,
            longitude: 24.95,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn lists_stations_under_any_path() {
        let database = MemoryDatabase::new()
            .with_stations(vec![station(1, "Kaivopuisto", 60.15)])
            .await;
        let app = app(database, Duration::ZERO);

        let (status, body) = send(&app, Method::GET, "/default/bikeapp?api=stations", "").await;

        assert_eq!(status, StatusCode::OK);
        let stations: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(stations[0]["ID"], 1);
        assert_eq!(stations[0]["FID"], 1);
        assert_eq!(stations[0]["Nimi"], "Kaivopuisto");
    }

    #[tokio::test]
    async fn zero_id_is_a_bad_request() {
        let app = app(MemoryDatabase::new(), Duration::ZERO);

        let (status, body) = send(&app, Method::GET, "/?api=journeys&id=0", "").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "0 is an invalid ID");
    }

    #[tokio::test]
    async fn second_request_within_a_second_gets_429() {
        let app = app(MemoryDatabase::new(), Duration::from_secs(1));

        let (first, _) = send(&app, Method::GET, "/?api=stations", "").await;
        let (second, body) = send(&app, Method::GET, "/?api=stations", "").await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, "please wait 1 second before making another request");
    }

    #[tokio::test]
    async fn rate_limit_message_follows_the_configured_interval() {
        let app = app(MemoryDatabase::new(), Duration::from_millis(2500));

        send(&app, Method::GET, "/?api=stations", "").await;
        let (status, body) = send(&app, Method::GET, "/?api=stations", "").await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, "please wait 2500 milliseconds before making another request");
    }

    #[tokio::test]
    async fn missing_station_is_404() {
        let app = app(MemoryDatabase::new(), Duration::ZERO);

        let (status, _) = send(&app, Method::GET, "/?api=stations&id=42", "").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn posting_journeys_is_405() {
        let app = app(MemoryDatabase::new(), Duration::ZERO);

        let (status, body) = send(&app, Method::POST, "/?api=journeys", "{}").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, "only GET method is allowed for journeys api");
    }

    #[tokio::test]
    async fn duplicate_station_returns_validation_errors_as_json() {
        let existing = station(1, "Kaivopuisto", 60.15);
        let database = MemoryDatabase::new()
            .with_stations(vec![existing.clone()])
            .await;
        let app = app(database, Duration::ZERO);
        let candidate = Station {
            id: 2,
            name_fi: existing.name_fi.clone(),
            ..station(2, "Hanasaari", 60.16)
        };

        let (status, body) = send(
            &app,
            Method::POST,
            "/?api=stations",
            &serde_json::to_string(&candidate).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let errors: Vec<String> = serde_json::from_str(&body).unwrap();
        assert_eq!(
            errors,
            vec!["station with Finnish name 'Kaivopuisto' already exists"]
        );
    }

    #[tokio::test]
    async fn created_station_is_served_by_id() {
        let app = app(MemoryDatabase::new(), Duration::ZERO);
        let new_station = station(7, "Hanasaari", 60.16);

        let (created, message) = send(
            &app,
            Method::POST,
            "/?api=stations",
            &serde_json::to_string(&new_station).unwrap(),
        )
        .await;
        let (status, body) = send(&app, Method::GET, "/?api=stations&id=7", "").await;

        assert_eq!(created, StatusCode::OK);
        assert_eq!(message, "new station added successfully!");
        assert_eq!(status, StatusCode::OK);
        let fetched: Station = serde_json::from_str(&body).unwrap();
        assert_eq!(fetched, new_station);
    }

    #[tokio::test]
    async fn failing_store_is_an_internal_server_error() {
        let database = MemoryDatabase::new();
        database.fail_lookups(true);
        let app = app(database.clone(), Duration::ZERO);

        let (status, body) = send(
            &app,
            Method::POST,
            "/?api=stations",
            &serde_json::to_string(&station(7, "Hanasaari", 60.16)).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "could not validate station 7");
        assert_eq!(database.station_count().await, 0);
        assert_eq!(database.sessions_open(), 0);
    }

    #[tokio::test]
    async fn ping_is_not_rate_limited() {
        let app = app(MemoryDatabase::new(), Duration::from_secs(1));

        let (first, _) = send(&app, Method::GET, "/ping", "").await;
        let (second, _) = send(&app, Method::GET, "/ping", "").await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::OK);
    }
}
