//! Admin API client.
//!
//! [`AdminApi`] is the seam between the screen controllers and the remote admin API. The
//! production implementation, [`HttpAdminApi`], issues plain JSON `GET`s (and, in
//! remote-confirmed delete mode, `DELETE`s) with reqwest. Every failure is mapped onto one of
//! the three fetch error kinds; callers decide what to do about it.

use crate::config::ConsoleConfig;
use crate::constants::{
    DOCTORS_PATH, PATIENTS_PATH, PATIENT_RETENTION_PATH, STATS_PATH, TOP_DOCTORS_PATH,
};
use crate::models::{
    DashboardStats, Doctor, DoctorsRes, EntityId, Patient, PatientRetention, PatientsRes,
    TopDoctorsRes,
};
use crate::{AdminError, AdminResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`AdminApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = AdminResult<T>> + Send + 'a>>;

/// Operations the console needs from the remote admin API.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn fetch_stats(&self) -> AdminResult<DashboardStats>;
    async fn fetch_top_doctors(&self) -> AdminResult<Vec<Doctor>>;
    async fn fetch_patient_retention(&self) -> AdminResult<PatientRetention>;
    async fn fetch_doctors(&self) -> AdminResult<Vec<Doctor>>;
    async fn fetch_patients(&self) -> AdminResult<Vec<Patient>>;
    async fn delete_doctor(&self, id: &EntityId) -> AdminResult<()>;
    async fn delete_patient(&self, id: &EntityId) -> AdminResult<()>;
}

/// reqwest-backed [`AdminApi`].
#[derive(Clone, Debug)]
pub struct HttpAdminApi {
    client: reqwest::Client,
    cfg: Arc<ConsoleConfig>,
}

impl HttpAdminApi {
    /// Build a client for the API at `cfg.api_base_url()`.
    ///
    /// The configured timeout, if any, applies to every request; otherwise reqwest's default
    /// behaviour is used.
    pub fn new(cfg: Arc<ConsoleConfig>) -> AdminResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.http_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AdminError::ClientBuild)?;

        Ok(Self { client, cfg })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.cfg
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AdminResult<T> {
        let url = self.cfg.endpoint_url(path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| AdminError::NetworkUnavailable {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdminError::NonSuccessStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| AdminError::BodyRead {
                url: url.clone(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| AdminError::MalformedResponseBody { url, source })
    }

    /// `{endpoint}/{id}` with the id percent-encoded as a single path segment.
    fn record_url(&self, path: &str, id: &EntityId) -> AdminResult<reqwest::Url> {
        let endpoint = self.cfg.endpoint_url(path);
        let mut url = reqwest::Url::parse(&endpoint).map_err(|err| {
            AdminError::InvalidConfig(format!("bad endpoint '{endpoint}': {err}"))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                AdminError::InvalidConfig(format!("endpoint '{endpoint}' cannot take a path"))
            })?
            .push(id.as_str());
        Ok(url)
    }

    async fn delete(&self, path: &str, id: &EntityId) -> AdminResult<()> {
        let record_url = self.record_url(path, id)?;
        let url = record_url.to_string();
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(record_url)
            .send()
            .await
            .map_err(|source| AdminError::NetworkUnavailable {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdminError::NonSuccessStatus {
                url,
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn fetch_stats(&self) -> AdminResult<DashboardStats> {
        self.get_json(STATS_PATH).await
    }

    async fn fetch_top_doctors(&self) -> AdminResult<Vec<Doctor>> {
        let res: TopDoctorsRes = self.get_json(TOP_DOCTORS_PATH).await?;
        Ok(res.top_doctors)
    }

    async fn fetch_patient_retention(&self) -> AdminResult<PatientRetention> {
        self.get_json(PATIENT_RETENTION_PATH).await
    }

    async fn fetch_doctors(&self) -> AdminResult<Vec<Doctor>> {
        let res: DoctorsRes = self.get_json(DOCTORS_PATH).await?;
        Ok(res.doctors)
    }

    async fn fetch_patients(&self) -> AdminResult<Vec<Patient>> {
        let res: PatientsRes = self.get_json(PATIENTS_PATH).await?;
        Ok(res.patients)
    }

    async fn delete_doctor(&self, id: &EntityId) -> AdminResult<()> {
        self.delete(DOCTORS_PATH, id).await
    }

    async fn delete_patient(&self, id: &EntityId) -> AdminResult<()> {
        self.delete(PATIENTS_PATH, id).await
    }
}
