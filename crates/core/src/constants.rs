//! Constants used throughout the admin core crate.
//!
//! This module contains the default remote locations and the endpoint paths of the admin API
//! so that clients, the stub server and tests agree on them.

/// Default base URL of the remote admin API when no explicit URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://zo0of1qvtk.execute-api.us-east-1.amazonaws.com/dev";

/// Default object-storage base URL that relative image and media filenames resolve against.
pub const DEFAULT_ASSET_BASE_URL: &str = "https://tobcare-bucket.s3.us-east-1.amazonaws.com";

/// Aggregate counters for the dashboard.
pub const STATS_PATH: &str = "/admin/stats";

/// Most frequently booked doctors.
pub const TOP_DOCTORS_PATH: &str = "/admin/top_doctors";

/// Returning-patient report.
pub const PATIENT_RETENTION_PATH: &str = "/admin/patient_retention";

/// Doctor list; also the prefix for `DELETE /admin/doctors/{id}`.
pub const DOCTORS_PATH: &str = "/admin/doctors";

/// Patient list; also the prefix for `DELETE /admin/patients/{id}`.
pub const PATIENTS_PATH: &str = "/admin/patients";

/// Appointment count at which a patient's activity level reads 100%.
pub const FULL_ACTIVITY_APPOINTMENTS: f64 = 20.0;
