//! StayHub DSS command-line entry point.
//!
//! Reads one JSON request from stdin and writes the JSON response to stdout.
//! Logs go to stderr.
//!
//! ```text
//! stayhub-dss            # recommendation request
//! stayhub-dss weights    # weight resolution only
//! ```

use std::error::Error;
use std::io;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::io::AsyncReadExt;
use tracing::info;

use stayhub_dss::adapters::postgres::{PostgresAttributeReader, PostgresReferenceDataReader};
use stayhub_dss::application::handlers::recommendation::PreferencePayload;
use stayhub_dss::application::{
    GetRecommendationsHandler, RecommendationRequest, ResolveWeightsHandler, ResolveWeightsQuery,
};
use stayhub_dss::config::{AppConfig, LoggingConfig};
use stayhub_dss::domain::foundation::DomainError;

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(serde::Deserialize)]
struct WeightsRequest {
    preferences: PreferencePayload,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging)?;

    let database = &config.database;
    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .connect_with(database.connect_options()?)
        .await?;
    info!(url = %database.redacted_url(), "Connected to database");

    let reference_data = Arc::new(PostgresReferenceDataReader::new(pool.clone()));

    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;

    let output = match std::env::args().nth(1).as_deref() {
        Some("weights") => {
            let request: WeightsRequest = serde_json::from_str(&input)?;
            let handler = ResolveWeightsHandler::new(reference_data.clone(), reference_data);
            let result = handler
                .handle(ResolveWeightsQuery {
                    preferences: request.preferences.into(),
                })
                .await
                .map_err(DomainError::from)?;
            serde_json::to_string_pretty(&result)?
        }
        None => {
            let request: RecommendationRequest = serde_json::from_str(&input)?;
            let handler = GetRecommendationsHandler::new(
                reference_data.clone(),
                reference_data,
                Arc::new(PostgresAttributeReader::new(pool)),
                config.engine.clone(),
            );
            let result = handler
                .handle(request.into())
                .await
                .map_err(DomainError::from)?;
            serde_json::to_string_pretty(&result)?
        }
        Some(other) => return Err(format!("unknown command: {other}").into()),
    };

    println!("{output}");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), BoxError> {
    let filter = logging.env_filter()?;
    let subscriber = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter);

    if logging.json {
        subscriber.json().try_init()?;
    } else {
        subscriber.try_init()?;
    }
    Ok(())
}
