use std::process::ExitCode;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use viva_server::config::Config;
use viva_server::data::SiteData;
use viva_server::routes::create_routes;
use viva_server::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,viva_server=debug")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let data = match SiteData::load(config.data_path.as_deref()) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load site dataset");
            return ExitCode::FAILURE;
        }
    };

    let addr = config.addr();
    let app = create_routes(AppState::new(data, config));

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind address");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Server running at http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
