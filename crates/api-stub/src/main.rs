//! Standalone admin API stub binary.
//!
//! ## Purpose
//! Serves the admin API endpoints locally from the built-in fallback dataset.
//!
//! ## Intended use
//! Point the console at it with `ADMIN_API_BASE_URL=http://localhost:3000` when the real API is
//! unreachable or when exercising remote-confirmed deletes without touching real records.

use api_stub::{app, StubState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Start the stub on `ADMIN_STUB_ADDR` (default: 0.0.0.0:3000).
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_stub=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("ADMIN_STUB_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting admin API stub on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(StubState::default())).await?;

    Ok(())
}
