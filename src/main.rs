use std::sync::Arc;

use anyhow::Context;

use fanxp_api::config::AppConfig;
use fanxp_api::database;
use fanxp_api::routes;
use fanxp_api::sms::OrangeSmsGateway;
use fanxp_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and the secrets
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let pool = database::connect(&config)
        .await
        .context("failed to connect to database")?;
    database::migrate(&pool)
        .await
        .context("failed to run migrations")?;

    let sms = OrangeSmsGateway::new(&config.sms).context("failed to build SMS client")?;

    let port = config.port;
    let state = AppState::new(pool, Arc::new(config), Arc::new(sms));
    let app = routes::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("FanXp API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
