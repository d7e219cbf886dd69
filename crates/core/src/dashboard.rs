//! Dashboard screen controller.
//!
//! The dashboard loads three reports (stats, top doctors, retention) one after another in a
//! single mount task. If any of them fails the whole dashboard switches to the fallback
//! dashboard, which also carries the activity section no endpoint serves.

use crate::client::AdminApi;
use crate::fallback::FallbackDataProvider;
use crate::models::{DashboardActivity, DashboardData};
use crate::screen::{FetchFailure, Lifecycle, Phase, Slot};
use crate::AdminResult;
use std::sync::Arc;

const LABEL: &str = "dashboard";

async fn fetch_dashboard(api: &dyn AdminApi) -> AdminResult<DashboardData> {
    let stats = api.fetch_stats().await?;
    let top_doctors = api.fetch_top_doctors().await?;
    let retention = api.fetch_patient_retention().await?;

    Ok(DashboardData {
        stats,
        top_doctors,
        retention,
        activity: DashboardActivity::default(),
    })
}

pub struct DashboardController {
    api: Arc<dyn AdminApi>,
    fallback: Arc<dyn FallbackDataProvider>,
    lifecycle: Lifecycle<DashboardData>,
}

impl DashboardController {
    pub fn new(api: Arc<dyn AdminApi>, fallback: Arc<dyn FallbackDataProvider>) -> Self {
        Self {
            api,
            fallback,
            lifecycle: Lifecycle::new(DashboardData::default()),
        }
    }

    /// Start the dashboard's one load. Returns `false` if already mounted or torn down.
    pub fn mount(&mut self) -> bool {
        let api = Arc::clone(&self.api);
        let fallback = Arc::clone(&self.fallback);

        self.lifecycle.start(
            LABEL,
            async move { fetch_dashboard(api.as_ref()).await },
            move |slot: &mut Slot<DashboardData>, result| match result {
                Ok(data) => {
                    slot.state = data;
                    slot.phase = Phase::Loaded;
                }
                Err(err) => {
                    tracing::error!("Error fetching dashboard data: {}", err);
                    slot.state = fallback.dashboard();
                    slot.phase = Phase::Failed(FetchFailure::from_error(&err));
                    slot.banner =
                        Some("Failed to load dashboard data. Please try again later.".into());
                }
            },
        )
    }

    pub async fn settled(&mut self) {
        self.lifecycle.settled().await;
    }

    pub fn unmount(&mut self) {
        self.lifecycle.teardown();
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.with(|slot| slot.phase.clone())
    }

    pub fn banner(&self) -> Option<String> {
        self.lifecycle.with(|slot| slot.banner.clone())
    }

    pub fn dismiss_banner(&self) {
        self.lifecycle.with(|slot| slot.banner = None);
    }

    /// Snapshot of everything the dashboard renders.
    pub fn data(&self) -> DashboardData {
        self.lifecycle.with(|slot| slot.state.clone())
    }
}
