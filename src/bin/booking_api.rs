use lambda_runtime::{Error, run, service_fn};
use lambda_tasks::api::booking::{self, BookingServices};
use lambda_tasks::clients::CognitoIdentityProvider;
use lambda_tasks::core::config::{BookingConfig, load_aws_config};
use lambda_tasks::storage::DynamoBookingStore;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_tasks::setup_logging();

    let config = BookingConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let sdk = load_aws_config().await;

    let identity = CognitoIdentityProvider::from_conf(&sdk, &config);
    let store = DynamoBookingStore::new(
        aws_sdk_dynamodb::Client::new(&sdk),
        &config.tables_table,
        &config.reservations_table,
    );
    let services = BookingServices {
        identity: &identity,
        tables: &store,
        reservations: &store,
    };

    run(service_fn(|event| booking::function_handler(services, event))).await
}
