use libs::utils::appstate::appstate::{AppState, create_app};
use libs::utils::config::app_config::AppConfig;
use libs::utils::errors::app_errors::{AppError, ErrCtx};
use libs::utils::logging::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().ctx("main:from_env")?;

    init_logging(&config.log_level)?;

    if let Err(err) = run(config).await {
        tracing::error!(error = %err, "server stopped");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    config.ensure_export_dir().ctx("run:ensure_export_dir")?;
    tracing::info!(
        export_dir = %config.export_dir().display(),
        driver = %config.db.driver,
        db_host = %config.db.host,
        db_name = %config.db.database,
        "export directory ready"
    );

    let bind_addr = config.bind_addr;
    let app = create_app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .ctx("run:bind")?;
    tracing::info!(%bind_addr, "rest server listening");

    axum::serve(listener, app).await.ctx("run:serve")?;
    Ok(())
}
