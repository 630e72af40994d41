//! User record types

use serde::{Deserialize, Serialize};

use crate::validation::{
    Validate, ValidationError, Validator, ADDRESS_REQUIRED, ID_NOT_POSITIVE, NAME_REQUIRED,
    PHONE_REQUIRED,
};

/// User ID, assigned by the store.
pub type UserId = u64;

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

impl User {
    /// Build a record from a create request and a freshly assigned ID.
    #[must_use]
    pub fn from_request(id: UserId, request: CreateUserRequest) -> Self {
        Self {
            id,
            name: request.name,
            email: request.email,
            address: request.address,
            phone: request.phone,
        }
    }

    /// Merge the fields present in `update`; absent fields keep their value.
    pub fn apply(&mut self, update: UpdateUserRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
    }
}

impl Validate for User {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .positive("id", self.id, ID_NOT_POSITIVE)
            .non_empty("name", &self.name, NAME_REQUIRED)
            .email("email", &self.email)
            .non_empty("address", &self.address, ADDRESS_REQUIRED)
            .non_empty("phone", &self.phone, PHONE_REQUIRED)
            .finish()
    }
}

/// Create user request (every field required)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .non_empty("name", &self.name, NAME_REQUIRED)
            .email("email", &self.email)
            .non_empty("address", &self.address, ADDRESS_REQUIRED)
            .non_empty("phone", &self.phone, PHONE_REQUIRED)
            .finish()
    }
}

/// Partial update request
///
/// Each present field is validated on its own; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UpdateUserRequest {
    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.address.is_none() && self.phone.is_none()
    }
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .optional(self.name.as_deref(), |v, name| {
                v.non_empty("name", name, NAME_REQUIRED);
            })
            .optional(self.email.as_deref(), |v, email| {
                v.email("email", email);
            })
            .optional(self.address.as_deref(), |v, address| {
                v.non_empty("address", address, ADDRESS_REQUIRED);
            })
            .optional(self.phone.as_deref(), |v, phone| {
                v.non_empty("phone", phone, PHONE_REQUIRED);
            })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> User {
        User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    #[test]
    fn apply_replaces_only_present_fields() {
        let mut user = ada();
        user.apply(UpdateUserRequest {
            email: Some("ada@lovelace.org".to_string()),
            ..UpdateUserRequest::default()
        });

        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@lovelace.org");
        assert_eq!(user.address, "1 Main St");
        assert_eq!(user.phone, "555-0100");
    }

    #[test]
    fn stored_user_with_zero_id_is_invalid() {
        let user = User { id: 0, ..ada() };
        let err = user.validate().unwrap_err();
        assert!(err.has_field("id"));
    }

    #[test]
    fn update_request_validates_present_fields_only() {
        let ok = UpdateUserRequest {
            phone: Some("555-0199".to_string()),
            ..UpdateUserRequest::default()
        };
        assert!(ok.validate().is_ok());

        let bad = UpdateUserRequest {
            name: Some(String::new()),
            email: Some("not-an-email".to_string()),
            ..UpdateUserRequest::default()
        };
        let err = bad.validate().unwrap_err();
        assert!(err.has_field("name"));
        assert!(err.has_field("email"));
        assert!(!err.has_field("phone"));
    }

    #[test]
    fn user_serializes_with_plain_field_names() {
        let json = serde_json::to_value(ada()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Ada",
                "email": "ada@x.com",
                "address": "1 Main St",
                "phone": "555-0100"
            })
        );
    }

    #[test]
    fn empty_update_request_reports_empty() {
        assert!(UpdateUserRequest::default().is_empty());
    }
}
