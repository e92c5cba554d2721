use anyhow::{anyhow, Result};
use aws_lambda_events::event::kinesis::KinesisEvent;
use lambda_event_adapter::adapter::EventAdapter;
use lambda_event_adapter::conf::{self, Settings};
use lambda_event_adapter::convert::KinesisJsonConverter;
use lambda_event_adapter::notify::NotifyUser;
use lambda_event_adapter::queue::SendConfirmation;
use lambda_runtime::{run, service_fn, LambdaEvent};
use once_cell::sync::OnceCell;

/// The adapter and its configuration, built once at startup and
/// reused across invocations.
struct App {
    adapter: EventAdapter<KinesisJsonConverter, NotifyUser<aws_sdk_sqs::Client>>,
    settings: Settings,
}

/// Global App instance.
static CURRENT: OnceCell<App> = OnceCell::new();

/// Initialize the global App instance.
async fn init() -> Result<()> {
    let settings: Settings = envy::from_env()?;
    let sqs_client = aws_sdk_sqs::Client::new(&conf::aws_sdk_config().await);
    let app = App {
        adapter: EventAdapter::new(KinesisJsonConverter, NotifyUser::new(sqs_client)),
        settings,
    };
    CURRENT
        .set(app)
        .map_err(|_| anyhow!("notify-user app was already initialized"))
}

/// Get the current App instance, or panic if it hasn't been
/// initialized.
fn current() -> &'static App {
    CURRENT.get().expect("app is not initialized")
}

/// Forward the accepted order events of the stream batch to the user
/// email queue.
async fn function_handler(event: LambdaEvent<KinesisEvent>) -> Result<Vec<SendConfirmation>> {
    let app = current();
    app.adapter.handle(event.payload, &app.settings).await
}

/// Run an AWS Lambda function that decodes order events from a
/// Kinesis batch and forwards the accepted ones to the user email
/// queue.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
    init().await?;

    run(service_fn(function_handler))
        .await
        .map_err(|e| anyhow!("{:?}", e))
}
