mod cli;
pub mod handlers;
pub mod middleware;
pub mod routes;
mod server;
pub mod state;
mod validate;

use axum::Router;
use form_intake::error::AppError;
use middleware::MiddlewareConfig;
use state::AppState;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

/// Route table wrapped in the request middleware stack.
pub fn build_app(state: AppState, config: &MiddlewareConfig) -> Router {
    middleware::apply(routes::router(state), config)
}
