use serde::{Deserialize, Serialize};

/// Payload sent to the registrations endpoint.
///
/// Only these five fields travel over the wire. City, state, phone, model year
/// and make are collected by the form but are not part of the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub vehicle_model: String,
    pub other_notes: String,
}

/// Text fields owned by the registration controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    VehicleModel,
    OtherNotes,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::VehicleModel => "vehicleModel",
            Field::OtherNotes => "otherNotes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email Address",
            Field::VehicleModel => "Vehicle Model",
            Field::OtherNotes => "Vehicle Notes (motor swap etc...)",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Field::FirstName | Field::LastName | Field::Email)
    }

    pub fn all() -> [Field; 5] {
        [
            Field::FirstName,
            Field::LastName,
            Field::Email,
            Field::VehicleModel,
            Field::OtherNotes,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_uses_camel_case_keys() {
        let submission = RegistrationSubmission {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            vehicle_model: "Civic".to_string(),
            other_notes: "K20 swap".to_string(),
        };

        let value = serde_json::to_value(&submission).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(|k| k.as_str()).collect();
        keys.sort();

        assert_eq!(
            keys,
            vec!["email", "firstName", "lastName", "otherNotes", "vehicleModel"]
        );
        assert_eq!(object["firstName"], "Jane");
        assert_eq!(object["otherNotes"], "K20 swap");
    }

    #[test]
    fn test_field_keys_match_payload() {
        let value = serde_json::to_value(RegistrationSubmission::default()).unwrap();
        for field in Field::all() {
            assert!(value.get(field.as_str()).is_some(), "missing {}", field.as_str());
        }
    }

    #[test]
    fn test_required_fields() {
        let required: Vec<Field> = Field::all().into_iter().filter(|f| f.is_required()).collect();
        assert_eq!(required, vec![Field::FirstName, Field::LastName, Field::Email]);
    }
}
