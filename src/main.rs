//! Lexcase backend entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lexcase::adapters::auth::JwtSessionVerifier;
use lexcase::adapters::http::middleware::{AccessGateConfig, SessionLayer};
use lexcase::adapters::http::{app_router, AppState};
use lexcase::adapters::postgres::{PostgresOrganizationDirectory, PostgresSubscriptionLedger};
use lexcase::adapters::stripe::StripeCheckoutGateway;
use lexcase::application::billing::{CheckoutPlan, IngestEventHandler, StartCheckoutHandler};
use lexcase::config::AppConfig;
use lexcase::domain::billing::WebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let ledger = Arc::new(PostgresSubscriptionLedger::new(pool.clone()));
    let directory = Arc::new(PostgresOrganizationDirectory::new(pool));
    let gateway = Arc::new(StripeCheckoutGateway::new(
        config.payment.stripe_api_key.clone(),
    ));

    let start_checkout = Arc::new(StartCheckoutHandler::new(
        directory.clone(),
        gateway,
        CheckoutPlan {
            price_id: config.payment.stripe_price_id.clone(),
            success_url: config.payment.checkout_success_url(),
            cancel_url: config.payment.checkout_cancel_url(),
        },
    ));
    let ingest_event = Arc::new(IngestEventHandler::new(
        WebhookVerifier::new(config.payment.stripe_webhook_secret.clone()),
        ledger.clone(),
    ));

    let state = AppState {
        start_checkout,
        ingest_event,
        ledger,
        directory,
    };

    let session = SessionLayer {
        verifier: Arc::new(JwtSessionVerifier::new(&config.auth.session_secret)),
        session_cookie: config.auth.session_cookie.clone(),
        secure_session_cookie: config.auth.secure_session_cookie(),
    };
    let gate = Arc::new(AccessGateConfig::from_auth(&config.auth));

    let cors = build_cors(config.server.cors_origins_list());

    let app = app_router(state, session, gate)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, environment = ?config.server.environment, "Starting lexcase backend");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors(origins: Vec<String>) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(tower_http::cors::AllowMethods::mirror_request())
            .allow_headers(tower_http::cors::AllowHeaders::mirror_request())
            .allow_credentials(true)
            .max_age(Duration::from_secs(3600))
    }
}
