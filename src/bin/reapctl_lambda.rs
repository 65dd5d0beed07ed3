use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use reapctl::config::{Config, EmailConfig};
use reapctl::email::Mailer;
use reapctl::lambda::{handle, ReaperEvent, ReaperResponse};
use reapctl::providers::AwsInventory;

async fn invoke(
    inventory: &AwsInventory,
    mailer: &Mailer,
    email: Option<&EmailConfig>,
    event: LambdaEvent<ReaperEvent>,
) -> Result<ReaperResponse, Error> {
    handle(inventory, mailer, email, event.payload)
        .await
        .map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    let config = Config::load(None).map_err(|e| Error::from(e.to_string()))?;
    let inventory = AwsInventory::new(Some(config.region.clone())).await;
    let mailer = Mailer::new(Some(config.region.clone())).await;

    run(service_fn(|event: LambdaEvent<ReaperEvent>| {
        invoke(&inventory, &mailer, config.email.as_ref(), event)
    }))
    .await
}
