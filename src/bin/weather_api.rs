use lambda_runtime::{Error, run, service_fn};
use lambda_tasks::api::weather;
use lambda_tasks::clients::OpenMeteoClient;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_tasks::setup_logging();

    let client = OpenMeteoClient::default();
    run(service_fn(|event| weather::function_handler(&client, event))).await
}
