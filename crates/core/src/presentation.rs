//! Presentation values derived from loaded data.
//!
//! Front ends render these directly: badge labels and classes, progress-bar widths, sort
//! arrows and resolved asset URLs. Percentages are passed through as computed, with no clamping
//! or rounding.

use crate::config::ConsoleConfig;
use crate::constants::FULL_ACTIVITY_APPOINTMENTS;
use crate::models::{Doctor, DoctorStatus, Patient};
use crate::query::{SortConfig, SortDirection};

/// Status pill shown on a doctor card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    /// Lowercase style class, e.g. `"inactive"`.
    pub class: &'static str,
}

impl StatusBadge {
    pub fn for_status(status: DoctorStatus) -> Self {
        let (label, class) = match status {
            DoctorStatus::Active => ("Active", "active"),
            DoctorStatus::Inactive => ("Inactive", "inactive"),
            DoctorStatus::Unknown => ("Unknown", "unknown"),
        };
        Self { label, class }
    }

    pub fn for_doctor(doctor: &Doctor) -> Option<Self> {
        doctor.status.map(Self::for_status)
    }
}

/// Horizontal bar whose width is a percentage of its track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressBar {
    percent: f64,
}

impl ProgressBar {
    pub fn from_percent(percent: f64) -> Self {
        Self { percent }
    }

    /// `part / whole` as a percentage; an empty whole gives an empty bar.
    pub fn from_ratio(part: f64, whole: f64) -> Self {
        if whole == 0.0 {
            return Self::from_percent(0.0);
        }
        Self::from_percent(part / whole * 100.0)
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// CSS-style width, e.g. `"68.5%"`.
    pub fn width(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// Bar for the retention-rate card.
pub fn retention_rate_bar(retention_rate: f64) -> ProgressBar {
    ProgressBar::from_percent(retention_rate)
}

/// Bar for returning patients as a share of all users.
pub fn returning_patients_bar(returning_patients: u64, total_users: u64) -> ProgressBar {
    ProgressBar::from_ratio(returning_patients as f64, total_users as f64)
}

/// Bar for users seen today as a share of all users.
pub fn active_users_bar(active_users_today: u64, total_users: u64) -> ProgressBar {
    ProgressBar::from_ratio(active_users_today as f64, total_users as f64)
}

/// Activity level of a patient; 20 appointments reads as 100%.
pub fn activity_level(appointments: u64) -> f64 {
    appointments as f64 / FULL_ACTIVITY_APPOINTMENTS * 100.0
}

/// Arrow shown next to a column heading when that column is the active sort key.
pub fn sort_indicator<K: Copy + Eq>(config: Option<SortConfig<K>>, key: K) -> Option<char> {
    match config {
        Some(config) if config.key == key => Some(match config.direction {
            SortDirection::Ascending => '↑',
            SortDirection::Descending => '↓',
        }),
        _ => None,
    }
}

pub fn doctor_image_url(cfg: &ConsoleConfig, doctor: &Doctor) -> Option<String> {
    cfg.asset_url(doctor.image.as_deref())
}

pub fn patient_media_url(cfg: &ConsoleConfig, patient: &Patient) -> Option<String> {
    cfg.asset_url(patient.media.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::{FallbackDataProvider, StaticFallback};
    use crate::models::PatientSortKey;

    #[test]
    fn inactive_badge_differs_from_active() {
        let doctors = StaticFallback.doctors();
        let active = StatusBadge::for_doctor(&doctors[0]).unwrap();
        let inactive = StatusBadge::for_doctor(&doctors[3]).unwrap();

        assert_eq!(active.class, "active");
        assert_eq!(inactive.class, "inactive");
        assert_ne!(active, inactive);
    }

    #[test]
    fn retention_rate_width_is_passed_through() {
        assert_eq!(retention_rate_bar(68.5).width(), "68.5%");
        assert_eq!(retention_rate_bar(100.0).width(), "100%");
        // Out-of-range values are not clamped here.
        assert_eq!(retention_rate_bar(130.25).width(), "130.25%");
    }

    #[test]
    fn ratio_bars_guard_against_zero_users() {
        assert_eq!(returning_patients_bar(876, 0).percent(), 0.0);
        assert_eq!(active_users_bar(50, 200).width(), "25%");
    }

    #[test]
    fn activity_level_scales_to_twenty_appointments() {
        assert_eq!(activity_level(20), 100.0);
        assert_eq!(activity_level(18), 90.0);
    }

    #[test]
    fn sort_indicator_only_marks_active_key() {
        let config = Some(SortConfig::ascending(PatientSortKey::Name));
        assert_eq!(sort_indicator(config, PatientSortKey::Name), Some('↑'));
        assert_eq!(sort_indicator(config, PatientSortKey::Email), None);

        let config = Some(SortConfig::new(PatientSortKey::Name, SortDirection::Descending));
        assert_eq!(sort_indicator(config, PatientSortKey::Name), Some('↓'));
        assert_eq!(sort_indicator::<PatientSortKey>(None, PatientSortKey::Name), None);
    }

    #[test]
    fn asset_urls_resolve_against_configured_base() {
        let cfg = ConsoleConfig::default();
        let doctor = &StaticFallback.doctors()[0];
        assert_eq!(
            doctor_image_url(&cfg, doctor).as_deref(),
            Some("https://tobcare-bucket.s3.us-east-1.amazonaws.com/doctor1.jpg")
        );

        let mut patient = StaticFallback.patients().remove(0);
        patient.media = None;
        assert_eq!(patient_media_url(&cfg, &patient), None);
    }
}
