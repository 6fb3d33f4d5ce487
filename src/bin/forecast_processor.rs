use lambda_runtime::{Error, run, service_fn};
use lambda_tasks::clients::OpenMeteoClient;
use lambda_tasks::core::config::{ForecastConfig, load_aws_config};
use lambda_tasks::scheduled::forecast;
use lambda_tasks::storage::DynamoItemStore;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_tasks::setup_logging();

    let config = ForecastConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let weather = OpenMeteoClient::default();
    let store = DynamoItemStore::from_conf(&load_aws_config().await);

    run(service_fn(|event| {
        forecast::function_handler(&weather, &store, &config, event)
    }))
    .await
}
