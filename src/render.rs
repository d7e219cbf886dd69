//! Plain-text rendering of the console screens.

use admin_core::models::{DashboardData, Doctor, Patient, PatientSortKey};
use admin_core::presentation::{
    active_users_bar, activity_level, doctor_image_url, patient_media_url, retention_rate_bar,
    returning_patients_bar, sort_indicator, ProgressBar, StatusBadge,
};
use admin_core::query::SortConfig;
use admin_core::ConsoleConfig;
use std::fmt::Write;

const BAR_CELLS: usize = 20;

/// Draw `bar` as `[#####---------------] 25%`.
///
/// Only the drawn cells are capped to the track; the label shows the width as given.
pub fn bar_line(bar: ProgressBar) -> String {
    let filled = (bar.percent() / 100.0 * BAR_CELLS as f64).round();
    let filled = filled.clamp(0.0, BAR_CELLS as f64) as usize;
    format!(
        "[{}{}] {}",
        "#".repeat(filled),
        "-".repeat(BAR_CELLS - filled),
        bar.width()
    )
}

pub fn dashboard(data: &DashboardData) -> String {
    let mut out = String::new();
    let stats = &data.stats;

    let _ = writeln!(out, "== Dashboard ==");
    let _ = writeln!(out, "Total doctors:       {}", stats.total_doctors);
    let _ = writeln!(out, "Total users:         {}", stats.total_users);
    let _ = writeln!(out, "Total revenue:       {}", stats.total_revenue);
    let _ = writeln!(out, "Total appointments:  {}", stats.total_appointments);

    let _ = writeln!(out, "\n-- Top doctors --");
    for doctor in &data.top_doctors {
        let _ = writeln!(
            out,
            "{:<24} {:<18} bookings: {:<5} revenue: {}",
            doctor.name,
            doctor.specialty,
            doctor.patients,
            doctor.revenue.map(|r| r.to_string()).unwrap_or_else(|| "-".into())
        );
    }

    let retention = &data.retention;
    let _ = writeln!(out, "\n-- Patient retention --");
    let _ = writeln!(out, "Retention rate:      {}", bar_line(retention_rate_bar(retention.retention_rate)));
    let _ = writeln!(
        out,
        "Returning patients:  {}  {}",
        retention.returning_patients,
        bar_line(returning_patients_bar(retention.returning_patients, stats.total_users))
    );

    let activity = &data.activity;
    let _ = writeln!(out, "\n-- Activity --");
    let _ = writeln!(
        out,
        "Active users today:  {}  {}",
        activity.active_users_today,
        bar_line(active_users_bar(activity.active_users_today, stats.total_users))
    );
    for patient in &activity.active_patients {
        let _ = writeln!(
            out,
            "{:<24} {:>3} appointments  {}",
            patient.name,
            patient.appointments,
            bar_line(ProgressBar::from_percent(activity_level(patient.appointments)))
        );
    }
    if !activity.appointment_trends.is_empty() {
        let _ = writeln!(out, "Appointment trend:   {:?}", activity.appointment_trends);
    }
    if !activity.revenue_trends.is_empty() {
        let _ = writeln!(out, "Revenue trend:       {:?}", activity.revenue_trends);
    }

    out
}

/// `total` is the number of loaded doctors, which the header shows even when `doctors` is a
/// filtered view.
pub fn doctors(cfg: &ConsoleConfig, total: usize, doctors: &[Doctor]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Doctors ==");
    let _ = writeln!(out, "Total Doctors: {}", total);

    for doctor in doctors {
        let badge = StatusBadge::for_doctor(doctor)
            .map(|b| format!("[{}]", b.label))
            .unwrap_or_default();
        let rating = doctor
            .rating
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:<18} patients: {:<5} rating: {:<4} {}",
            doctor.id, doctor.name, doctor.specialty, doctor.patients, rating, badge
        );
        if let Some(url) = doctor_image_url(cfg, doctor) {
            let _ = writeln!(out, "      {}", url);
        }
    }

    out
}

pub fn patients(
    cfg: &ConsoleConfig,
    total: usize,
    sort: Option<SortConfig<PatientSortKey>>,
    patients: &[Patient],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Patients ==");
    let _ = writeln!(out, "Total Patients: {}", total);

    let headings: Vec<String> = PatientSortKey::ALL
        .iter()
        .map(|&key| match sort_indicator(sort, key) {
            Some(arrow) => format!("{} {}", key.heading(), arrow),
            None => key.heading().to_string(),
        })
        .collect();
    let _ = writeln!(out, "{:>4}  {}", "ID", headings.join(" | "));

    for patient in patients {
        let dob = patient
            .date_of_birth
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "{:>4}  {} | {} | {} | {} | {} | {} | {}",
            patient.id,
            patient.username,
            patient.name,
            patient.phone_number,
            patient.email,
            patient.gender,
            dob,
            patient.blood_type
        );
        if let Some(url) = patient_media_url(cfg, patient) {
            let _ = writeln!(out, "      {}", url);
        }
    }

    out
}
