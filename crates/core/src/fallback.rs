//! Fallback datasets.
//!
//! When a screen's fetch fails it renders a fixed substitute dataset instead of an empty error
//! page. The data comes from a [`FallbackDataProvider`] injected into each controller, so tests
//! can swap in their own fixtures. [`StaticFallback`] is the built-in dataset.

use crate::models::{
    ActivePatient, DashboardActivity, DashboardData, DashboardStats, Doctor, DoctorStatus,
    EntityId, Patient, PatientRetention,
};
use chrono::NaiveDate;

/// Source of substitute data for screens whose fetch failed.
pub trait FallbackDataProvider: Send + Sync {
    fn doctors(&self) -> Vec<Doctor>;
    fn patients(&self) -> Vec<Patient>;
    fn dashboard(&self) -> DashboardData;
}

/// The console's built-in fallback dataset.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticFallback;

fn listed_doctor(
    id: u64,
    name: &str,
    specialty: &str,
    patients: u64,
    rating: f64,
    status: DoctorStatus,
) -> Doctor {
    Doctor {
        id: EntityId::from(id),
        name: name.into(),
        specialty: specialty.into(),
        patients,
        rating: Some(rating),
        revenue: None,
        status: Some(status),
        image: Some(format!("doctor{id}.jpg")),
    }
}

fn top_doctor(id: u64, name: &str, specialty: &str, bookings: u64, revenue: f64) -> Doctor {
    Doctor {
        id: EntityId::from(id),
        name: name.into(),
        specialty: specialty.into(),
        patients: bookings,
        rating: None,
        revenue: Some(revenue),
        status: None,
        image: Some(format!("doctor{id}.jpg")),
    }
}

#[allow(clippy::too_many_arguments)]
fn patient(
    id: u64,
    username: &str,
    name: &str,
    phone_number: &str,
    email: &str,
    gender: &str,
    (year, month, day): (i32, u32, u32),
    blood_type: &str,
) -> Patient {
    Patient {
        id: EntityId::from(id),
        username: username.into(),
        name: name.into(),
        phone_number: phone_number.into(),
        email: email.into(),
        gender: gender.into(),
        date_of_birth: NaiveDate::from_ymd_opt(year, month, day),
        blood_type: blood_type.into(),
        media: Some(format!("patient{id}.jpg")),
    }
}

impl FallbackDataProvider for StaticFallback {
    fn doctors(&self) -> Vec<Doctor> {
        vec![
            listed_doctor(1, "Dr. Sarah Johnson", "Cardiology", 145, 4.8, DoctorStatus::Active),
            listed_doctor(2, "Dr. Michael Chen", "Dermatology", 132, 4.7, DoctorStatus::Active),
            listed_doctor(3, "Dr. Emily Rodriguez", "Pediatrics", 128, 4.9, DoctorStatus::Active),
            listed_doctor(4, "Dr. James Wilson", "Orthopedics", 118, 4.6, DoctorStatus::Inactive),
        ]
    }

    fn patients(&self) -> Vec<Patient> {
        vec![
            patient(1, "john123", "John Doe", "123456789", "john@example.com", "Male", (1990, 1, 1), "O+"),
            patient(2, "jane456", "Jane Smith", "987654321", "jane@example.com", "Female", (1992, 5, 15), "A-"),
            patient(3, "samuel789", "Samuel Johnson", "555888777", "samuel@example.com", "Male", (1980, 3, 12), "B+"),
            patient(4, "sara321", "Sara Lee", "123123123", "sara@example.com", "Female", (1995, 7, 19), "AB+"),
        ]
    }

    fn dashboard(&self) -> DashboardData {
        DashboardData {
            stats: DashboardStats {
                total_doctors: 42,
                total_users: 1587,
                total_revenue: 78450.0,
                total_appointments: 2340,
            },
            top_doctors: vec![
                top_doctor(1, "Dr. Sarah Johnson", "Cardiology", 145, 14500.0),
                top_doctor(2, "Dr. Michael Chen", "Dermatology", 132, 13200.0),
                top_doctor(3, "Dr. Emily Rodriguez", "Pediatrics", 128, 12800.0),
            ],
            retention: PatientRetention {
                returning_patients: 876,
                retention_rate: 68.5,
            },
            activity: DashboardActivity {
                active_patients: vec![
                    ActivePatient {
                        name: "John Doe".into(),
                        appointments: 20,
                    },
                    ActivePatient {
                        name: "Jane Smith".into(),
                        appointments: 18,
                    },
                ],
                active_users_today: 45,
                appointment_trends: vec![50, 75, 60, 80, 100],
                revenue_trends: vec![2000.0, 2200.0, 2100.0, 2500.0, 2300.0],
            },
        }
    }
}
