//! In-memory `AdminApi` double for controller tests.

use crate::client::AdminApi;
use crate::fallback::{FallbackDataProvider, StaticFallback};
use crate::models::{DashboardStats, Doctor, EntityId, Patient, PatientRetention};
use crate::{AdminError, AdminResult, FetchErrorKind};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone)]
pub(crate) enum FakeResponse<T> {
    Ok(T),
    Fail(FetchErrorKind),
}

pub(crate) fn error_of_kind(kind: FetchErrorKind, url: &str) -> AdminError {
    let url = url.to_string();
    match kind {
        FetchErrorKind::NetworkUnavailable => AdminError::NetworkUnavailable {
            url,
            source: reqwest::Client::new()
                .get("http://[::1")
                .build()
                .expect_err("invalid url should not build"),
        },
        FetchErrorKind::NonSuccessStatus => AdminError::NonSuccessStatus { url, status: 500 },
        FetchErrorKind::MalformedResponseBody => AdminError::MalformedResponseBody {
            url,
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        },
    }
}

pub(crate) struct FakeAdminApi {
    doctors: FakeResponse<Vec<Doctor>>,
    patients: FakeResponse<Vec<Patient>>,
    stats: FakeResponse<DashboardStats>,
    top_doctors: FakeResponse<Vec<Doctor>>,
    retention: FakeResponse<PatientRetention>,
    delete_failure: Option<FetchErrorKind>,
    delay: Option<Duration>,
    doctor_fetches: AtomicUsize,
    calls: Mutex<Vec<&'static str>>,
    deleted: Mutex<Vec<EntityId>>,
}

impl Default for FakeAdminApi {
    fn default() -> Self {
        let dashboard = StaticFallback.dashboard();
        Self {
            doctors: FakeResponse::Ok(StaticFallback.doctors()),
            patients: FakeResponse::Ok(StaticFallback.patients()),
            stats: FakeResponse::Ok(dashboard.stats),
            top_doctors: FakeResponse::Ok(dashboard.top_doctors),
            retention: FakeResponse::Ok(dashboard.retention),
            delete_failure: None,
            delay: None,
            doctor_fetches: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }
}

impl FakeAdminApi {
    pub(crate) fn with_doctors(mut self, response: FakeResponse<Vec<Doctor>>) -> Self {
        self.doctors = response;
        self
    }

    pub(crate) fn with_patients(mut self, response: FakeResponse<Vec<Patient>>) -> Self {
        self.patients = response;
        self
    }

    pub(crate) fn with_stats(mut self, response: FakeResponse<DashboardStats>) -> Self {
        self.stats = response;
        self
    }

    pub(crate) fn with_top_doctors(mut self, response: FakeResponse<Vec<Doctor>>) -> Self {
        self.top_doctors = response;
        self
    }

    pub(crate) fn with_retention(mut self, response: FakeResponse<PatientRetention>) -> Self {
        self.retention = response;
        self
    }

    pub(crate) fn with_failing_deletes(mut self, kind: FetchErrorKind) -> Self {
        self.delete_failure = Some(kind);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn doctor_fetches(&self) -> usize {
        self.doctor_fetches.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn deleted(&self) -> Vec<EntityId> {
        self.deleted.lock().unwrap().clone()
    }

    async fn respond<T: Clone + Send + Sync>(
        &self,
        path: &'static str,
        response: &FakeResponse<T>,
    ) -> AdminResult<T> {
        self.calls.lock().unwrap().push(path);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match response {
            FakeResponse::Ok(value) => Ok(value.clone()),
            FakeResponse::Fail(kind) => Err(error_of_kind(*kind, path)),
        }
    }

    fn record_delete(&self, id: &EntityId) -> AdminResult<()> {
        if let Some(kind) = self.delete_failure {
            return Err(error_of_kind(kind, "DELETE"));
        }
        self.deleted.lock().unwrap().push(id.clone());
        Ok(())
    }
}

#[async_trait]
impl AdminApi for FakeAdminApi {
    async fn fetch_stats(&self) -> AdminResult<DashboardStats> {
        self.respond("/admin/stats", &self.stats).await
    }

    async fn fetch_top_doctors(&self) -> AdminResult<Vec<Doctor>> {
        self.respond("/admin/top_doctors", &self.top_doctors).await
    }

    async fn fetch_patient_retention(&self) -> AdminResult<PatientRetention> {
        self.respond("/admin/patient_retention", &self.retention).await
    }

    async fn fetch_doctors(&self) -> AdminResult<Vec<Doctor>> {
        self.doctor_fetches.fetch_add(1, Ordering::SeqCst);
        self.respond("/admin/doctors", &self.doctors).await
    }

    async fn fetch_patients(&self) -> AdminResult<Vec<Patient>> {
        self.respond("/admin/patients", &self.patients).await
    }

    async fn delete_doctor(&self, id: &EntityId) -> AdminResult<()> {
        self.record_delete(id)
    }

    async fn delete_patient(&self, id: &EntityId) -> AdminResult<()> {
        self.record_delete(id)
    }
}
