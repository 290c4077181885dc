use crate::build_app;
use crate::cli::ServeArgs;
use crate::middleware::MiddlewareConfig;
use crate::state::AppState;
use form_intake::config::{AppConfig, EnvSettings};
use form_intake::error::AppError;
use form_intake::telemetry;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let state = AppState::new(Arc::new(EnvSettings), config.server.name.as_str());
    let app = build_app(state, &MiddlewareConfig::from(&config.http));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        ?config.environment,
        %addr,
        server_name = %config.server.name,
        body_limit_bytes = config.http.body_limit_bytes,
        "form intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
