//! # API Stub
//!
//! Local stand-in for the clinic admin API.
//!
//! Serves the five read endpoints the console consumes, plus deletes, from in-memory state
//! seeded with the built-in fallback dataset. Useful for running the console without network
//! access and for driving `admin-core` end to end in integration tests.

#![warn(rust_2018_idioms)]

use admin_core::fallback::{FallbackDataProvider, StaticFallback};
use admin_core::models::{
    DashboardStats, Doctor, DoctorsRes, EntityId, Patient, PatientRetention, PatientsRes,
    TopDoctorsRes,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

struct Records {
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
}

/// Shared state of the stub server.
///
/// Doctor and patient lists are mutable (deletes remove from them); the dashboard reports
/// are fixed at construction.
#[derive(Clone)]
pub struct StubState {
    records: Arc<RwLock<Records>>,
    stats: DashboardStats,
    top_doctors: Vec<Doctor>,
    retention: PatientRetention,
}

impl StubState {
    pub fn seeded_from(provider: &dyn FallbackDataProvider) -> Self {
        let dashboard = provider.dashboard();
        Self {
            records: Arc::new(RwLock::new(Records {
                doctors: provider.doctors(),
                patients: provider.patients(),
            })),
            stats: dashboard.stats,
            top_doctors: dashboard.top_doctors,
            retention: dashboard.retention,
        }
    }
}

impl Default for StubState {
    fn default() -> Self {
        Self::seeded_from(&StaticFallback)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        stats,
        top_doctors,
        patient_retention,
        list_doctors,
        list_patients,
        delete_doctor,
        delete_patient,
    ),
    components(schemas(
        HealthRes,
        DashboardStats,
        PatientRetention,
        TopDoctorsRes,
        DoctorsRes,
        PatientsRes,
        Doctor,
        Patient,
        EntityId,
        admin_core::models::DoctorStatus,
    ))
)]
pub struct ApiDoc;

/// Build the stub's router over `state`.
pub fn app(state: StubState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/admin/stats", get(stats))
        .route("/admin/top_doctors", get(top_doctors))
        .route("/admin/patient_retention", get(patient_retention))
        .route("/admin/doctors", get(list_doctors))
        .route("/admin/doctors/:id", delete(delete_doctor))
        .route("/admin/patients", get(list_patients))
        .route("/admin/patients/:id", delete(delete_patient))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "admin API stub is alive".into(),
    })
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/admin/stats",
    responses(
        (status = 200, description = "Aggregate counters", body = DashboardStats)
    )
)]
#[axum::debug_handler]
async fn stats(State(state): State<StubState>) -> Json<DashboardStats> {
    Json(state.stats)
}

#[utoipa::path(
    get,
    path = "/admin/top_doctors",
    responses(
        (status = 200, description = "Highest-booked doctors", body = TopDoctorsRes)
    )
)]
#[axum::debug_handler]
async fn top_doctors(State(state): State<StubState>) -> Json<TopDoctorsRes> {
    Json(TopDoctorsRes {
        top_doctors: state.top_doctors,
    })
}

#[utoipa::path(
    get,
    path = "/admin/patient_retention",
    responses(
        (status = 200, description = "Returning-patient report", body = PatientRetention)
    )
)]
#[axum::debug_handler]
async fn patient_retention(State(state): State<StubState>) -> Json<PatientRetention> {
    Json(state.retention)
}

#[utoipa::path(
    get,
    path = "/admin/doctors",
    responses(
        (status = 200, description = "All doctors", body = DoctorsRes)
    )
)]
#[axum::debug_handler]
async fn list_doctors(State(state): State<StubState>) -> Json<DoctorsRes> {
    let doctors = state.records.read().await.doctors.clone();
    Json(DoctorsRes { doctors })
}

#[utoipa::path(
    get,
    path = "/admin/patients",
    responses(
        (status = 200, description = "All patients", body = PatientsRes)
    )
)]
#[axum::debug_handler]
async fn list_patients(State(state): State<StubState>) -> Json<PatientsRes> {
    let patients = state.records.read().await.patients.clone();
    Json(PatientsRes { patients })
}

#[utoipa::path(
    delete,
    path = "/admin/doctors/{id}",
    params(("id" = String, Path, description = "Doctor identifier")),
    responses(
        (status = 204, description = "Doctor deleted"),
        (status = 404, description = "No doctor with that identifier")
    )
)]
#[axum::debug_handler]
async fn delete_doctor(State(state): State<StubState>, Path(id): Path<String>) -> StatusCode {
    let mut records = state.records.write().await;
    remove_record(&mut records.doctors, |d: &Doctor| d.id.as_str() == id, "doctor", &id)
}

#[utoipa::path(
    delete,
    path = "/admin/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 404, description = "No patient with that identifier")
    )
)]
#[axum::debug_handler]
async fn delete_patient(State(state): State<StubState>, Path(id): Path<String>) -> StatusCode {
    let mut records = state.records.write().await;
    remove_record(&mut records.patients, |p: &Patient| p.id.as_str() == id, "patient", &id)
}

fn remove_record<T>(
    records: &mut Vec<T>,
    matches: impl Fn(&T) -> bool,
    kind: &str,
    id: &str,
) -> StatusCode {
    match records.iter().position(matches) {
        Some(index) => {
            records.remove(index);
            tracing::info!("deleted {} {}", kind, id);
            StatusCode::NO_CONTENT
        }
        None => {
            tracing::warn!("delete of unknown {} {}", kind, id);
            StatusCode::NOT_FOUND
        }
    }
}
