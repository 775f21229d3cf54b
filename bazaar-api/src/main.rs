use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bazaar_api::{app, AppState};
use bazaar_checkout::{CheckoutEngine, CheckoutPolicy, RetryPolicy};
use bazaar_domain::repository::{CatalogLookup, OrderStore, VendorNotifier};
use bazaar_store::app_config::Config;
use bazaar_store::{LogNotifier, PgCatalogLookup, PgOrderStore};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bazaar_api=debug,bazaar_checkout=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load configuration");

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!("../bazaar-store/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let store: Arc<dyn OrderStore> = Arc::new(PgOrderStore::new(pool.clone()));
    let catalog: Arc<dyn CatalogLookup> = Arc::new(PgCatalogLookup::new(pool));
    let notifier: Arc<dyn VendorNotifier> = Arc::new(LogNotifier);

    let rules = &config.business_rules;
    let policy = CheckoutPolicy {
        lookup_timeout: Duration::from_millis(rules.lookup_timeout_ms),
        write_timeout: Duration::from_millis(rules.write_timeout_ms),
        writer_concurrency: rules.writer_concurrency,
        notify_retry: RetryPolicy {
            max_attempts: rules.notify_max_attempts,
            backoff: Duration::from_millis(rules.notify_backoff_ms),
        },
    };

    let engine = Arc::new(CheckoutEngine::new(
        catalog,
        store.clone(),
        notifier,
        policy,
    ));

    let router = app(AppState { engine, store });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Bazaar API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, router)
        .await
        .expect("Server terminated");
}
