use database::{DatabaseConnectionInfo, PgDatabase};
use web::{config::Config, routes, start_lambda, start_web_server, WebState};

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    env_logger::init();

    let config = Config::from_env()?;

    // database
    let database_connection_info = DatabaseConnectionInfo::from_env()?;
    let database = PgDatabase::new(database_connection_info);

    let routes = routes(WebState::new(database, &config));

    if config.serverless {
        log::info!("starting lambda function");
        start_lambda(routes).await
    } else {
        log::info!("listening on {}", config.bind_address);
        start_web_server(routes, config.bind_address).await?;
        Ok(())
    }
}
