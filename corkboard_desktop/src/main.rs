use anyhow::{anyhow, Result};
use corkboard_backend::api;
use corkboard_backend::bootstrap;
use corkboard_backend::config::CorkboardConfig;
use corkboard_backend::telemetry;
use tokio::runtime::Runtime;
use tracing::error;

fn main() -> Result<()> {
    telemetry::init_tracing();

    let runtime = Runtime::new()?;
    let config = CorkboardConfig::from_env()?;
    let database = bootstrap::initialize(&config)?;

    let server_config = config.clone();
    let server = runtime.spawn(async move {
        if let Err(err) = api::serve_http(server_config, database).await {
            error!(error = ?err, "embedded HTTP server exited");
        }
    });

    let base_url = format!("http://127.0.0.1:{}", config.api_port);
    std::env::set_var("CORKBOARD_API_URL", &base_url);

    let ui_result = corkboard_frontend::run_frontend();

    server.abort();

    ui_result.map_err(|err| anyhow!(err.to_string()))
}
