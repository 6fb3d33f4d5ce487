use lambda_runtime::{Error, run, service_fn};
use lambda_tasks::core::config::{UuidConfig, load_aws_config};
use lambda_tasks::scheduled::uuid_generator;
use lambda_tasks::storage::S3ObjectStore;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_tasks::setup_logging();

    let config = UuidConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let store = S3ObjectStore::from_conf(&load_aws_config().await);

    run(service_fn(|event| {
        uuid_generator::function_handler(&store, &config, event)
    }))
    .await
}
