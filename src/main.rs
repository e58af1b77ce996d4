use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &eventlogd::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        port = %cfg.port,
        loglevel = %cfg.loglevel,
        token_ttl_minutes = cfg.token_ttl_minutes
    );

    let pool = eventlogd::db::connect(&cfg.database_url).await?;
    eventlogd::db::init_schema(&pool).await?;

    let users = eventlogd::db::UserStore::new(pool.clone());
    let events = eventlogd::db::EventStore::new(pool);
    eventlogd::seed::run(&events, &users).await?;

    let state = eventlogd::router::AppState::new(
        eventlogd::auth::Authenticator::new(users),
        events,
    );
    let app = eventlogd::router::app_router(state);

    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
