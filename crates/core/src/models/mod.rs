//! Wire models for the admin API and the `Entity` abstraction the list screens work over.
//!
//! Doctors and patients are the two entity kinds. Both are read-only from the console's point
//! of view apart from local deletion, so the models are plain serde structs with lenient field
//! defaults: a record missing a field still loads and renders an empty cell.

mod dashboard;
mod doctor;
mod id;
mod lenient;
mod patient;

pub use dashboard::{
    ActivePatient, DashboardActivity, DashboardData, DashboardStats, PatientRetention,
    TopDoctorsRes,
};
pub use doctor::{Doctor, DoctorStatus};
pub use id::EntityId;
pub use patient::{Patient, PatientSortKey};

use crate::query::SortConfig;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;

/// A record kind that a list screen can hold, search and (optionally) sort.
pub trait Entity: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Columns this entity can be sorted by. [`NoSortKey`] for unsortable entities.
    type SortKey: Copy + Eq + std::fmt::Debug + Send + Sync + 'static;

    fn id(&self) -> &EntityId;

    /// Human-readable name for confirmation prompts and logs.
    fn display_name(&self) -> &str;

    /// The fields a search term is matched against.
    fn designated_fields(&self) -> Vec<&str>;

    fn compare_by(&self, other: &Self, key: Self::SortKey) -> Ordering;

    /// Sort order a freshly mounted screen starts with.
    fn default_sort() -> Option<SortConfig<Self::SortKey>> {
        None
    }
}

/// Sort key of an entity that has no sortable columns. It has no values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoSortKey {}

/// Envelope of `/admin/doctors`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DoctorsRes {
    pub doctors: Vec<Doctor>,
}

/// Envelope of `/admin/patients`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientsRes {
    pub patients: Vec<Patient>,
}
