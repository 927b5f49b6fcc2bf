use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Registry status of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberStatus {
    #[serde(rename = "ACTIVO")]
    Active,
    #[serde(rename = "INACTIVO")]
    Inactive,
    #[serde(rename = "PENDIENTE_ALTA")]
    PendingEntry,
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberStatus::Active => write!(f, "Activo"),
            MemberStatus::Inactive => write!(f, "Inactivo"),
            MemberStatus::PendingEntry => write!(f, "Pendiente de alta"),
        }
    }
}

/// One administered person, as returned by `GET /api/me/` and the admin
/// `gestion` endpoints.
///
/// Identity fields are writable only from the admin surface; contact
/// fields are writable by the member; registry fields are admin-only.
/// The split is enforced by the PATCH payload types below, not at
/// runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: i64,

    // Identity
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellidos")]
    pub last_name: String,
    #[serde(rename = "dni")]
    pub national_id: Option<String>,
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "genero")]
    pub gender: Option<String>,
    #[serde(rename = "estado_civil")]
    pub marital_status: Option<String>,
    #[serde(rename = "parroquia_bautismo")]
    pub baptism_parish: Option<String>,
    #[serde(rename = "fecha_bautismo")]
    pub baptism_date: Option<NaiveDate>,

    // Contact
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    #[serde(rename = "codigo_postal")]
    pub postal_code: Option<String>,
    #[serde(rename = "localidad")]
    pub locality: Option<String>,
    #[serde(rename = "provincia")]
    pub province: Option<String>,
    pub region: Option<String>,

    // Registry
    #[serde(rename = "numero_hermano")]
    pub member_number: Option<i64>,
    #[serde(rename = "estado")]
    pub status: MemberStatus,
    #[serde(rename = "fecha_alta")]
    pub admission_date: Option<NaiveDate>,
    #[serde(rename = "fecha_baja")]
    pub termination_date: Option<NaiveDate>,
    #[serde(rename = "es_admin", default)]
    pub is_admin: bool,

    // Subscriptions
    #[serde(rename = "areas_interes", default)]
    pub interest_areas: Vec<String>,
}

impl MemberProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// PATCH payload for the member self-edit surface (`PATCH /api/me/`).
///
/// Only contact fields, the optional password change and the full
/// replacement subscription set are representable here, so identity and
/// registry fields cannot leak through regardless of form content.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactUpdate {
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "codigo_postal", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "localidad", skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(rename = "provincia", skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Never serialized when blank. The server treats any present value
    /// as a password change request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "areas_interes", skip_serializing_if = "Option::is_none")]
    pub interest_areas: Option<Vec<String>>,
}

impl ContactUpdate {
    /// Set the password field, dropping blank input so an empty password
    /// is never sent.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        let password = password.into();
        self.password = if password.is_empty() {
            None
        } else {
            Some(password)
        };
        self
    }
}

/// PATCH payload for the admin surface
/// (`PATCH /api/hermanos/{id}/gestion/`). All field groups are writable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminUpdate {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "apellidos", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "dni", skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(rename = "fecha_nacimiento", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "genero", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "estado_civil", skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(rename = "parroquia_bautismo", skip_serializing_if = "Option::is_none")]
    pub baptism_parish: Option<String>,
    #[serde(rename = "fecha_bautismo", skip_serializing_if = "Option::is_none")]
    pub baptism_date: Option<NaiveDate>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "codigo_postal", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "localidad", skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(rename = "provincia", skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "numero_hermano", skip_serializing_if = "Option::is_none")]
    pub member_number: Option<i64>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<MemberStatus>,
    #[serde(rename = "fecha_alta", skip_serializing_if = "Option::is_none")]
    pub admission_date: Option<NaiveDate>,
    #[serde(rename = "fecha_baja", skip_serializing_if = "Option::is_none")]
    pub termination_date: Option<NaiveDate>,
    #[serde(rename = "es_admin", skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(rename = "areas_interes", skip_serializing_if = "Option::is_none")]
    pub interest_areas: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile_json() -> &'static str {
        r#"{
            "id": 42,
            "nombre": "Maria",
            "apellidos": "Garcia Lopez",
            "dni": "12345678Z",
            "fecha_nacimiento": "1985-03-12",
            "genero": "F",
            "estado_civil": "CASADA",
            "parroquia_bautismo": "San Juan",
            "fecha_bautismo": "1985-06-01",
            "telefono": "600111222",
            "email": "maria@example.org",
            "direccion": "Calle Mayor 1",
            "codigo_postal": "41001",
            "localidad": "Sevilla",
            "provincia": "Sevilla",
            "region": "Andalucia",
            "numero_hermano": 317,
            "estado": "ACTIVO",
            "fecha_alta": "2010-09-15",
            "fecha_baja": null,
            "es_admin": false,
            "areas_interes": ["HERMANOS", "CARIDAD"]
        }"#
    }

    #[test]
    fn parses_full_profile() {
        let profile: MemberProfile =
            serde_json::from_str(sample_profile_json()).expect("profile should parse");
        assert_eq!(profile.id, 42);
        assert_eq!(profile.full_name(), "Maria Garcia Lopez");
        assert_eq!(profile.status, MemberStatus::Active);
        assert_eq!(profile.interest_areas, vec!["HERMANOS", "CARIDAD"]);
        assert!(profile.termination_date.is_none());
    }

    #[test]
    fn missing_areas_default_to_empty() {
        let json = r#"{"id": 1, "nombre": "Ana", "apellidos": "Ruiz", "estado": "PENDIENTE_ALTA"}"#;
        let profile: MemberProfile = serde_json::from_str(json).expect("profile should parse");
        assert!(profile.interest_areas.is_empty());
        assert!(!profile.is_admin);
        assert_eq!(profile.status, MemberStatus::PendingEntry);
    }

    #[test]
    fn blank_password_is_never_serialized() {
        let update = ContactUpdate {
            phone: Some("600333444".to_string()),
            ..Default::default()
        }
        .with_password("");

        let json = serde_json::to_value(&update).expect("update should serialize");
        assert!(json.get("password").is_none());
        assert_eq!(json["telefono"], "600333444");
    }

    #[test]
    fn non_blank_password_is_serialized() {
        let update = ContactUpdate::default().with_password("s3creta");
        let json = serde_json::to_value(&update).expect("update should serialize");
        assert_eq!(json["password"], "s3creta");
    }

    #[test]
    fn omitted_update_fields_are_absent_from_payload() {
        let update = ContactUpdate {
            email: Some("nueva@example.org".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).expect("update should serialize");
        let obj = json.as_object().expect("payload should be an object");
        assert_eq!(obj.len(), 1);
        assert!(obj.contains_key("email"));
    }
}
