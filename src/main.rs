//! # View Counter - نقطه ورود برنامه
//!
//! ترتیب راه‌اندازی:
//! 1. لود `.env` و تنظیمات (بدون `STORE_CONNECTION_STRING` برنامه بالا نمیاد)
//! 2. اتصال به store و اجرای migration‌ها
//! 3. اجرای سرور تا Ctrl+C یا SIGTERM
//! 4. بستن pool بعد از تموم شدن request‌های در جریان

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use view_counter::{
    api::create_router,
    config::{Config, Environment},
    database::Database,
    error::{AppError, Result},
};

#[tokio::main]
async fn main() -> Result<()> {
    // اگه فایل .env نباشه اوکیه
    dotenvy::dotenv().ok();

    // فرمت لاگ به تنظیمات بستگی داره؛ اگه تنظیمات خراب باشه با فرمت پیش‌فرض لاگ میکنیم
    let loaded = Config::from_env();
    init_tracing(loaded.as_ref().map(|c| c.environment).unwrap_or_default());

    info!("🚀 Starting View Counter Service...");

    let config = loaded.inspect_err(|e| error!(error = %e, "Invalid configuration"))?;
    info!(
        database = %config.database_name,
        container = %config.container_name,
        "✅ Configuration loaded successfully"
    );

    // یک pool برای کل عمر process
    let database = Database::connect(&config.connection_string).await?;
    info!("✅ Database connected successfully");

    database.migrate().await?;
    info!("✅ Database migrations applied");

    let app = create_router(database.clone(), config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| AppError::Config(format!("invalid COUNTER_HOST/COUNTER_PORT: {}", e)))?;
    let listener = TcpListener::bind(addr).await?;
    info!("🌐 Server listening on http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()));

    database.close().await;
    info!("👋 Shutdown complete");

    served
}

/// راه‌اندازی سیستم tracing برای لاگینگ
///
/// development: فرمت pretty، production: فرمت JSON
fn init_tracing(environment: Environment) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("view_counter=debug,tower_http=debug"));

    let json = environment.is_production();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| fmt::layer().json().with_target(true)))
        .with((!json).then(|| {
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .pretty()
        }))
        .init();
}

/// منتظر Ctrl+C یا SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
