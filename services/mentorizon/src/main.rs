use sea_orm::Database;
use tracing::info;

use mentorizon::config::MentorizonConfig;
use mentorizon::router::build_router;
use mentorizon::state::AppState;
use mentorizon_core::config::Config;
use mentorizon_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = MentorizonConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let router = build_router(AppState::new(db));
    let http_addr = format!("0.0.0.0:{}", config.mentorizon_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("mentorizon listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
