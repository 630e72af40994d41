//! MCP tool and prompt parameter schemas
//!
//! Defines the input parameter structures for all tools and prompts.
//! All structs derive `Debug`, `Deserialize`, and `JsonSchema` as required by rmcp.
//! Type-level constraints (required fields, integers) are enforced when rmcp
//! deserializes the arguments; value-level constraints live in each
//! `Validate` impl and run before a handler touches the store.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use user_manager_core::types::{CreateUserRequest, UpdateUserRequest, UserId};
use user_manager_core::validation::{
    Validate, ValidationError, Validator, ID_NOT_POSITIVE, NAME_REQUIRED,
};

/// Upper bound for `generate-user-list`'s `limit`.
pub const MAX_LIST_LIMIT: u64 = 100;

const LIMIT_OUT_OF_RANGE: &str = "Limit must be between 1 and 100";

// ===== Tools =====

/// Parameters for `create-user` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateUserParams {
    /// Full name of the user.
    #[schemars(description = "Full name of the user", length(min = 1))]
    pub name: String,

    /// Email address.
    #[schemars(description = "Email address of the user", email)]
    pub email: String,

    /// Postal address.
    #[schemars(description = "Postal address of the user", length(min = 1))]
    pub address: String,

    /// Phone number.
    #[schemars(description = "Phone number of the user", length(min = 1))]
    pub phone: String,
}

impl Validate for CreateUserParams {
    fn validate(&self) -> Result<(), ValidationError> {
        CreateUserRequest::from(self.clone()).validate()
    }
}

impl From<CreateUserParams> for CreateUserRequest {
    fn from(params: CreateUserParams) -> Self {
        Self {
            name: params.name,
            email: params.email,
            address: params.address,
            phone: params.phone,
        }
    }
}

/// Parameters for `update-user` tool.
///
/// Only the fields that are present are changed.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateUserParams {
    /// ID of the user to update.
    #[schemars(description = "ID of the user to update", range(min = 1))]
    pub id: UserId,

    #[schemars(description = "New full name", length(min = 1))]
    pub name: Option<String>,

    #[schemars(description = "New email address", email)]
    pub email: Option<String>,

    #[schemars(description = "New postal address", length(min = 1))]
    pub address: Option<String>,

    #[schemars(description = "New phone number", length(min = 1))]
    pub phone: Option<String>,
}

impl UpdateUserParams {
    /// Split into the target ID and the partial update.
    pub fn into_parts(self) -> (UserId, UpdateUserRequest) {
        (
            self.id,
            UpdateUserRequest {
                name: self.name,
                email: self.email,
                address: self.address,
                phone: self.phone,
            },
        )
    }
}

impl Validate for UpdateUserParams {
    fn validate(&self) -> Result<(), ValidationError> {
        let (id, update) = self.clone().into_parts();
        Validator::new()
            .positive("id", id, ID_NOT_POSITIVE)
            .merge(update.validate())
            .finish()
    }
}

/// Parameters for `delete-user` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteUserParams {
    #[schemars(description = "ID of the user to delete", range(min = 1))]
    pub id: UserId,
}

impl Validate for DeleteUserParams {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new().positive("id", self.id, ID_NOT_POSITIVE).finish()
    }
}

/// Parameters for `get-user` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetUserParams {
    #[schemars(description = "ID of the user to fetch", range(min = 1))]
    pub id: UserId,
}

impl Validate for GetUserParams {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new().positive("id", self.id, ID_NOT_POSITIVE).finish()
    }
}

// ===== Prompts =====
//
// MCP clients send prompt arguments as strings, so numeric arguments also
// accept their decimal string form.

/// Parameters for `generate-fake-user` prompt.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateFakeUserParams {
    #[schemars(description = "Name of the user")]
    pub name: String,
}

impl Validate for GenerateFakeUserParams {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .non_empty("name", &self.name, NAME_REQUIRED)
            .finish()
    }
}

/// Parameters for `generate-user-report` prompt.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateUserReportParams {
    #[serde(rename = "userId", deserialize_with = "number_or_string")]
    #[schemars(description = "ID of the user to generate report for")]
    pub user_id: UserId,
}

impl Validate for GenerateUserReportParams {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .positive("userId", self.user_id, "User ID must be a positive integer")
            .finish()
    }
}

/// Output layout for `generate-user-list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    #[default]
    Table,
    List,
    Json,
}

impl fmt::Display for ListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::List => "list",
            Self::Json => "json",
        })
    }
}

/// Parameters for `generate-user-list` prompt.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateUserListParams {
    #[serde(default)]
    #[schemars(description = "Format for the user list (table, list, json; default: table)")]
    pub format: ListFormat,

    #[serde(deserialize_with = "number_or_string")]
    #[schemars(description = "Maximum number of users to include (1-100)")]
    pub limit: u64,
}

impl Validate for GenerateUserListParams {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .range("limit", self.limit, 1, MAX_LIST_LIMIT, LIMIT_OUT_OF_RANGE)
            .finish()
    }
}

/// Accept `7` or `"7"`.
fn number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("expected a non-negative integer, got \"{s}\""))
        }),
    }
}
