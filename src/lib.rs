/// Lambda Tasks - a set of small, independent AWS Lambda handlers.
///
/// Each handler reacts to one event source, validates the event, makes at
/// most one or two calls to a managed service and returns a JSON response:
///
/// - `hello-world`: `GET /hello` through API Gateway
/// - `sns-handler` / `sqs-handler`: log every delivered message
/// - `events-api`: store user-submitted events in DynamoDB
/// - `audit-producer`: DynamoDB Stream on `Configuration` → `Audit` rows
/// - `uuid-generator`: scheduled batch of UUIDs written to S3
/// - `weather-api` / `forecast-processor`: Open-Meteo forecasts
/// - `booking-api`: Cognito sign-up/sign-in plus tables and reservations
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution, one binary per handler
/// - aws-sdk-rust for DynamoDB, S3 and Cognito
/// - reqwest for the Open-Meteo HTTP API
/// - Tokio for async runtime
///
/// Service access sits behind the traits in [`storage`] and [`clients`], so
/// every handler can be driven with in-memory fakes.
///
/// # Example
///
/// ```no_run
/// use lambda_tasks::api::booking::{self, BookingServices};
/// use lambda_tasks::clients::CognitoIdentityProvider;
/// use lambda_tasks::core::config::{BookingConfig, load_aws_config};
/// use lambda_tasks::storage::DynamoBookingStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), lambda_runtime::Error> {
///     lambda_tasks::setup_logging();
///
///     let config = BookingConfig::from_env()?;
///     let sdk = load_aws_config().await;
///     let identity = CognitoIdentityProvider::from_conf(&sdk, &config);
///     let store = DynamoBookingStore::new(
///         aws_sdk_dynamodb::Client::new(&sdk),
///         &config.tables_table,
///         &config.reservations_table,
///     );
///     let services = BookingServices {
///         identity: &identity,
///         tables: &store,
///         reservations: &store,
///     };
///
///     lambda_runtime::run(lambda_runtime::service_fn(|event| {
///         booking::function_handler(services, event)
///     }))
///     .await
/// }
/// ```
// Module declarations
pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod messaging;
pub mod scheduled;
pub mod storage;
pub mod streams;

pub use errors::TaskError;

#[cfg(feature = "debug-logs")]
const DEFAULT_LOG_LEVEL: &str = "debug";
#[cfg(not(feature = "debug-logs"))]
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. The level comes from `RUST_LOG` and defaults
/// to `info` (`debug` with the `debug-logs` feature). Calling it more than
/// once is harmless.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// lambda_tasks::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
