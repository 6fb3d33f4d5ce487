use lambda_runtime::{Error, run, service_fn};
use lambda_tasks::core::config::{AuditConfig, load_aws_config};
use lambda_tasks::storage::DynamoItemStore;
use lambda_tasks::streams::audit;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_tasks::setup_logging();

    let config = AuditConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let store = DynamoItemStore::from_conf(&load_aws_config().await);

    run(service_fn(|event| audit::function_handler(&store, &config, event))).await
}
