use super::{lenient, Entity, EntityId};
use crate::query::{SortConfig, SortDirection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use utoipa::ToSchema;

/// A patient record as served by `/admin/patients`.
///
/// Field names on the wire are the API's flat lowercase ones (`phonenumber`, `dateofbirth`,
/// `bloodtype`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(
        default,
        rename = "phonenumber",
        deserialize_with = "lenient::or_default"
    )]
    pub phone_number: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub gender: String,
    #[serde(
        default,
        rename = "dateofbirth",
        deserialize_with = "lenient::date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(
        default,
        rename = "bloodtype",
        deserialize_with = "lenient::or_default"
    )]
    pub blood_type: String,
    #[serde(
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub media: Option<String>,
}

/// Columns of the patient table that can be sorted on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatientSortKey {
    Username,
    Name,
    PhoneNumber,
    Email,
    Gender,
    DateOfBirth,
    BloodType,
}

impl PatientSortKey {
    pub const ALL: [PatientSortKey; 7] = [
        PatientSortKey::Username,
        PatientSortKey::Name,
        PatientSortKey::PhoneNumber,
        PatientSortKey::Email,
        PatientSortKey::Gender,
        PatientSortKey::DateOfBirth,
        PatientSortKey::BloodType,
    ];

    /// The wire field name this key sorts on.
    pub fn field_name(self) -> &'static str {
        match self {
            PatientSortKey::Username => "username",
            PatientSortKey::Name => "name",
            PatientSortKey::PhoneNumber => "phonenumber",
            PatientSortKey::Email => "email",
            PatientSortKey::Gender => "gender",
            PatientSortKey::DateOfBirth => "dateofbirth",
            PatientSortKey::BloodType => "bloodtype",
        }
    }

    /// Column heading used by table renderers.
    pub fn heading(self) -> &'static str {
        match self {
            PatientSortKey::Username => "Username",
            PatientSortKey::Name => "Full Name",
            PatientSortKey::PhoneNumber => "Phone",
            PatientSortKey::Email => "Email",
            PatientSortKey::Gender => "Gender",
            PatientSortKey::DateOfBirth => "Date of Birth",
            PatientSortKey::BloodType => "Blood Type",
        }
    }
}

impl FromStr for PatientSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalised.as_str() {
            "username" => Ok(PatientSortKey::Username),
            "name" | "fullname" => Ok(PatientSortKey::Name),
            "phonenumber" | "phone" => Ok(PatientSortKey::PhoneNumber),
            "email" => Ok(PatientSortKey::Email),
            "gender" => Ok(PatientSortKey::Gender),
            "dateofbirth" | "dob" => Ok(PatientSortKey::DateOfBirth),
            "bloodtype" => Ok(PatientSortKey::BloodType),
            _ => Err(format!("unknown patient sort key '{s}'")),
        }
    }
}

impl Entity for Patient {
    type SortKey = PatientSortKey;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn designated_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.phone_number]
    }

    // Plain ordering on the field's own type: strings byte-wise (case-sensitive), dates
    // chronologically with a missing date first.
    fn compare_by(&self, other: &Self, key: PatientSortKey) -> Ordering {
        match key {
            PatientSortKey::Username => self.username.cmp(&other.username),
            PatientSortKey::Name => self.name.cmp(&other.name),
            PatientSortKey::PhoneNumber => self.phone_number.cmp(&other.phone_number),
            PatientSortKey::Email => self.email.cmp(&other.email),
            PatientSortKey::Gender => self.gender.cmp(&other.gender),
            PatientSortKey::DateOfBirth => self.date_of_birth.cmp(&other.date_of_birth),
            PatientSortKey::BloodType => self.blood_type.cmp(&other.blood_type),
        }
    }

    fn default_sort() -> Option<SortConfig<PatientSortKey>> {
        Some(SortConfig::new(PatientSortKey::Name, SortDirection::Ascending))
    }
}
