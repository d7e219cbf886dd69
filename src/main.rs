//! Clinic admin console.
//!
//! Each subcommand mounts one screen, waits for its fetch to settle (falling back to the
//! built-in dataset if the API misbehaves), applies the requested search, sort and delete, and
//! prints the result.

mod render;

use admin_core::config::{
    base_url_from_env_value, delete_mode_from_env_value, http_timeout_from_env_value,
};
use admin_core::constants::{DEFAULT_API_BASE_URL, DEFAULT_ASSET_BASE_URL};
use admin_core::controller::ListResource;
use admin_core::models::{EntityId, PatientSortKey};
use admin_core::{
    AdminApi, ConsoleConfig, DashboardController, DoctorScreen, FallbackDataProvider,
    HttpAdminApi, PatientScreen, RemoteDelete, ScreenController, StaticFallback,
};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clinic-admin")]
#[command(about = "Clinic administration console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard reports
    Dashboard,
    /// List doctors
    Doctors {
        /// Only show doctors whose name or specialty contains this text
        #[arg(long)]
        search: Option<String>,
        /// Delete the doctor with this ID before listing
        #[arg(long)]
        delete: Option<String>,
    },
    /// List patients
    Patients {
        /// Only show patients whose name, email or phone contains this text
        #[arg(long)]
        search: Option<String>,
        /// Click a column heading (repeat to toggle direction)
        #[arg(long = "sort")]
        sort: Vec<PatientSortKey>,
        /// Delete the patient with this ID before listing
        #[arg(long)]
        delete: Option<String>,
    },
}

fn load_config() -> anyhow::Result<ConsoleConfig> {
    let api_base_url = base_url_from_env_value(
        std::env::var("ADMIN_API_BASE_URL").ok(),
        DEFAULT_API_BASE_URL,
    );
    let asset_base_url = base_url_from_env_value(
        std::env::var("ADMIN_ASSET_BASE_URL").ok(),
        DEFAULT_ASSET_BASE_URL,
    );
    let delete_mode = delete_mode_from_env_value(std::env::var("ADMIN_DELETE_MODE").ok())?;
    let http_timeout = http_timeout_from_env_value(std::env::var("ADMIN_HTTP_TIMEOUT_SECS").ok())?;

    Ok(ConsoleConfig::new(
        api_base_url,
        asset_base_url,
        delete_mode,
        http_timeout,
    )?)
}

/// Main entry point for the admin console
///
/// # Environment Variables
/// - `ADMIN_API_BASE_URL`: Remote admin API (default: the hosted dev API)
/// - `ADMIN_ASSET_BASE_URL`: Base URL for doctor images and patient media
/// - `ADMIN_DELETE_MODE`: `local-only` (default) or `remote-confirmed`
/// - `ADMIN_HTTP_TIMEOUT_SECS`: Request timeout in seconds (optional)
///
/// # Errors
/// Returns an error if the configuration is invalid or the HTTP client cannot be built. Fetch
/// failures are not errors: the screen falls back and the failure is reported in its banner.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_admin=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let cfg = Arc::new(load_config()?);
    tracing::debug!("using admin API at {}", cfg.api_base_url());

    let api: Arc<dyn AdminApi> = Arc::new(HttpAdminApi::new(cfg.clone())?);
    let fallback: Arc<dyn FallbackDataProvider> = Arc::new(StaticFallback);

    match cli.command {
        Commands::Dashboard => {
            let mut screen = DashboardController::new(api, fallback);
            screen.mount();
            screen.settled().await;

            print_banner(screen.banner());
            print!("{}", render::dashboard(&screen.data()));
            screen.unmount();
        }
        Commands::Doctors { search, delete } => {
            let mut screen: DoctorScreen =
                ScreenController::new(api, fallback, cfg.delete_mode());
            screen.mount();
            screen.settled().await;

            print_banner(screen.banner());
            if let Some(id) = delete {
                delete_entity(&screen, EntityId::new(id)).await;
            }
            if let Some(term) = search {
                screen.set_search_term(term);
            }
            print!("{}", render::doctors(&cfg, screen.len(), &screen.view()));
            screen.unmount();
        }
        Commands::Patients {
            search,
            sort,
            delete,
        } => {
            let mut screen: PatientScreen =
                ScreenController::new(api, fallback, cfg.delete_mode());
            screen.mount();
            screen.settled().await;

            print_banner(screen.banner());
            if let Some(id) = delete {
                delete_entity(&screen, EntityId::new(id)).await;
            }
            for key in sort {
                screen.sort_by(key);
            }
            if let Some(term) = search {
                screen.set_search_term(term);
            }
            print!(
                "{}",
                render::patients(&cfg, screen.len(), screen.sort_config(), &screen.view())
            );
            screen.unmount();
        }
    }

    Ok(())
}

fn print_banner(banner: Option<String>) {
    if let Some(message) = banner {
        println!("! {}\n", message);
    }
}

/// Passing `--delete` on the command line is the confirmation.
async fn delete_entity<E: ListResource>(screen: &ScreenController<E>, id: EntityId) {
    if !screen.request_delete(&id) {
        println!("No {} entry with ID {}; nothing deleted.\n", E::LABEL, id);
        return;
    }

    let outcome = screen.confirm_delete().await;
    if let Some(removed) = outcome.removed {
        println!("Deleted {} ({}).", removed.display_name(), removed.id());
    }
    match outcome.remote {
        RemoteDelete::Skipped => {}
        RemoteDelete::Confirmed => println!("Remote delete confirmed."),
        RemoteDelete::Failed(failure) => println!(
            "Remote delete failed ({}); the entry will reappear on the next full load.",
            failure.kind
        ),
    }
    println!();
}
