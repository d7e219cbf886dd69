use super::{lenient, Entity, EntityId, NoSortKey};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;

/// Whether a doctor is currently taking bookings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DoctorStatus {
    Active,
    Inactive,
    /// Any status string the console does not know about.
    #[serde(other)]
    Unknown,
}

impl DoctorStatus {
    pub fn label(self) -> &'static str {
        match self {
            DoctorStatus::Active => "Active",
            DoctorStatus::Inactive => "Inactive",
            DoctorStatus::Unknown => "Unknown",
        }
    }
}

/// A doctor record as served by `/admin/doctors` and `/admin/top_doctors`.
///
/// The two endpoints disagree on naming: the list calls the count `patients`, the top-doctor
/// report calls it `bookings`. Both land in [`Doctor::patients`]. Top-doctor records carry
/// `revenue` but no `status` or `rating`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Doctor {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub specialty: String,
    #[serde(default, alias = "bookings", deserialize_with = "lenient::or_default")]
    pub patients: u64,
    #[serde(
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub revenue: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<DoctorStatus>,
    #[serde(
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

impl Entity for Doctor {
    type SortKey = NoSortKey;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn designated_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.specialty]
    }

    fn compare_by(&self, _other: &Self, key: NoSortKey) -> Ordering {
        match key {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_record() {
        let doctor: Doctor = serde_json::from_str(
            r#"{"id": 4, "name": "Dr. James Wilson", "specialty": "Orthopedics",
                "patients": 118, "rating": 4.6, "status": "Inactive", "image": "doctor4.jpg"}"#,
        )
        .unwrap();

        assert_eq!(doctor.id, EntityId::from(4));
        assert_eq!(doctor.patients, 118);
        assert_eq!(doctor.status, Some(DoctorStatus::Inactive));
        assert_eq!(doctor.revenue, None);
    }

    #[test]
    fn parses_top_doctor_record_with_bookings() {
        let doctor: Doctor = serde_json::from_str(
            r#"{"id": 1, "name": "Dr. Sarah Johnson", "specialty": "Cardiology",
                "bookings": 145, "revenue": 14500, "image": "doctor1.jpg"}"#,
        )
        .unwrap();

        assert_eq!(doctor.patients, 145);
        assert_eq!(doctor.revenue, Some(14500.0));
        assert_eq!(doctor.status, None);
    }

    #[test]
    fn tolerates_missing_fields_and_unknown_status() {
        let doctor: Doctor = serde_json::from_str(r#"{"id": "d-9", "status": "On Leave"}"#).unwrap();
        assert_eq!(doctor.name, "");
        assert_eq!(doctor.status, Some(DoctorStatus::Unknown));
    }

    #[test]
    fn null_and_mistyped_fields_do_not_reject_the_record() {
        let doctor: Doctor = serde_json::from_str(
            r#"{"id": 5, "name": null, "specialty": ["x"], "patients": "many", "rating": "high",
                "status": 3}"#,
        )
        .unwrap();

        assert_eq!(doctor.id, EntityId::from(5));
        assert_eq!(doctor.name, "");
        assert_eq!(doctor.specialty, "");
        assert_eq!(doctor.patients, 0);
        assert_eq!(doctor.rating, None);
        assert_eq!(doctor.status, None);
    }
}
