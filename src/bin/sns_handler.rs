use lambda_runtime::{Error, run, service_fn};
use lambda_tasks::messaging::sns::function_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_tasks::setup_logging();
    run(service_fn(function_handler)).await
}
