use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use resizer_lambda::{logging, HandlerConfig, ResizeHandler, S3Event, S3ObjectStore};

async fn function_handler(
    event: LambdaEvent<S3Event>,
    handler: &ResizeHandler<S3ObjectStore>,
) -> Result<Option<String>, Error> {
    tracing::debug!(request_id = %event.context.request_id, "received notification");
    Ok(handler.handle(&event.payload).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();

    let config = HandlerConfig::from_env()?;
    let shared_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = S3ObjectStore::new(S3Client::new(&shared_config), config.part_size);

    tracing::info!(
        max_width = config.settings.max_width,
        suffix = %config.settings.resized_suffix,
        jpeg_quality = config.settings.jpeg_quality,
        part_size = store.part_size(),
        "starting resizer"
    );

    let handler = ResizeHandler::new(store, config.settings);

    run(service_fn(|event| function_handler(event, &handler))).await
}
