use clap::Parser;
use std::sync::Arc;
use tempconvert_gateway::utils::{logger, validation::Validate};
use tempconvert_gateway::{app, AppState, CliConfig, ConversionClient, Settings, SoapConverter};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(settings.verbose, settings.json_logs());
    tracing::info!("Starting tempconvert-gateway {}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Effective settings: {:?}", settings);

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // 綁定遠端服務；失敗就不啟動
    let converter = match SoapConverter::connect(&settings.remote).await {
        Ok(converter) => converter,
        Err(e) => {
            tracing::error!("Failed to initialize SOAP client: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("SOAP client initialized successfully ({})", converter.endpoint());

    let state = AppState::ready(ConversionClient::new(Arc::new(converter)));
    let router = app(state, &settings.server);

    let listener = TcpListener::bind(settings.server.bind_address()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
