use gymdesk::server::{config::Config, error::Error, model::app::AppState, router, startup};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("gymdesk=info,tower_http=info,sea_orm_migration=warn")
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let db = startup::connect_to_database(&config).await?;
    startup::bootstrap_admin(&config, &db).await?;

    let session = startup::session_layer();
    let messaging = startup::build_messaging_client(&config);
    let renderer = startup::build_invoice_renderer(&config).await?;
    let worker =
        startup::start_worker(&config, db.clone(), messaging.clone(), renderer.clone()).await?;

    let app = router::routes(&config.static_dir)
        .with_state(AppState {
            db,
            messaging,
            renderer,
            worker: worker.clone(),
        })
        .layer(session)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    worker.pool.stop().await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
