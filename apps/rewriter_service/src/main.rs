use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use rewriter_service::{app_module::AppState, app_router::application, config::ServiceConfig};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = ServiceConfig::parse();

    let subscriber_builder = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE);

    if config.is_dev() {
        tracing::subscriber::set_global_default(
            subscriber_builder
                .compact()
                .pretty()
                .with_ansi(true)
                .finish(),
        )
        .context("setting dev subscriber failed")?;
    } else {
        tracing::subscriber::set_global_default(
            subscriber_builder.json().with_ansi(false).finish(),
        )
        .context("setting prod subscriber failed")?;
    }

    let state = AppState::new(&config);
    let app = application(state, config.request_timeout());

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("unable to bind {}", address))?;

    tracing::info!(
        model = %config.model,
        max_retries = config.max_retries,
        "Server started, listening on {}",
        address
    );
    axum::serve(listener, app)
        .await
        .context("server exited with an error")?;

    Ok(())
}
