use toastbox::config::Config;
use toastbox::routes;
use toastbox::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let state = AppState::from_config(&config);
    tracing::info!(
        prefs_path = %config.prefs_path.display(),
        toast_default_duration_ms = config.toast_default_duration_ms,
        "state initialized"
    );

    let app = routes::app(state);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "toastbox listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
