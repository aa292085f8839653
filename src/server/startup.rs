use sea_orm::DatabaseConnection;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::server::{
    config::Config,
    error::Error,
    messaging::MessagingClient,
    service::{
        auth::AuthService,
        invoice::{InvoiceConfig, InvoiceRenderer},
    },
    worker::{pool::WorkerPoolConfig, Worker},
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Create the configured bootstrap admin if it does not exist yet
pub async fn bootstrap_admin(config: &Config, db: &DatabaseConnection) -> Result<(), Error> {
    let Some(admin) = &config.bootstrap_admin else {
        return Ok(());
    };

    let created = AuthService::new(db)
        .bootstrap_admin(&admin.username, &admin.password)
        .await?;

    if !created {
        tracing::debug!(username = %admin.username, "Bootstrap admin already exists");
    }

    Ok(())
}

/// Configure in-memory session management
///
/// Sessions do not survive a restart, which signs every admin out.
pub fn session_layer() -> SessionManagerLayer<MemoryStore> {
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry};

    // Secure cookies outside of debug builds
    let secure_cookies = !cfg!(debug_assertions);

    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
}

pub fn build_messaging_client(config: &Config) -> MessagingClient {
    MessagingClient::new(&config.messaging_base_url, &config.messaging_api_key)
}

/// Build the invoice renderer and create its output directory
pub async fn build_invoice_renderer(config: &Config) -> Result<InvoiceRenderer, Error> {
    let output_dir = config.generated_dir();
    tokio::fs::create_dir_all(&output_dir).await?;

    let renderer = InvoiceRenderer::new(InvoiceConfig {
        template_path: config.invoice_template_path.clone(),
        logo_path: config.invoice_logo_path.clone(),
        font_path: config.invoice_font_path.clone(),
        output_dir,
    });

    if !config.invoice_template_path.exists() {
        tracing::warn!(
            path = %config.invoice_template_path.display(),
            "Invoice template not found, invoice rendering will fail until it is added"
        );
    }

    Ok(renderer)
}

/// Build the reminder worker and start its pool
pub async fn start_worker(
    config: &Config,
    db: DatabaseConnection,
    messaging: MessagingClient,
    renderer: InvoiceRenderer,
) -> Result<Worker, Error> {
    let worker = Worker::new(worker_pool_config(config), db, messaging, renderer);
    worker.pool.start().await?;

    Ok(worker)
}

/// Pool settings with the configured reminder throttle
fn worker_pool_config(config: &Config) -> WorkerPoolConfig {
    WorkerPoolConfig {
        throttle_ms: config.reminder_throttle_seconds.saturating_mul(1000),
        ..Default::default()
    }
}
