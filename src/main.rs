use markd::{
    configuration::get_configuration,
    startup,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = get_configuration()?;

    let subscriber = get_subscriber(
        "markd".into(),
        "info".into(),
        std::io::stdout,
        settings.telemetry.otlp_endpoint.as_deref(),
    )?;
    init_subscriber(subscriber)?;

    let result = startup::run(settings).await;
    opentelemetry::global::shutdown_tracer_provider();
    result
}
