use super::Doctor;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate counters served by `/admin/stats`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_doctors: u64,
    pub total_users: u64,
    pub total_revenue: f64,
    pub total_appointments: u64,
}

/// Returning-patient report served by `/admin/patient_retention`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientRetention {
    pub returning_patients: u64,
    /// Percentage in the 0–100 range.
    pub retention_rate: f64,
}

/// Envelope of `/admin/top_doctors`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopDoctorsRes {
    pub top_doctors: Vec<Doctor>,
}

/// One entry of the "most active patients" list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePatient {
    pub name: String,
    pub appointments: u64,
}

/// Activity section of the dashboard.
///
/// No endpoint serves this; it is only ever filled from the fallback dataset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardActivity {
    pub active_patients: Vec<ActivePatient>,
    pub active_users_today: u64,
    pub appointment_trends: Vec<u64>,
    pub revenue_trends: Vec<f64>,
}

/// Everything the dashboard screen renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub top_doctors: Vec<Doctor>,
    pub retention: PatientRetention,
    pub activity: DashboardActivity,
}
