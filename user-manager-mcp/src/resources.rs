//! MCP resources: the full user list and a per-user profile template.

use rmcp::model::{
    AnnotateAble, RawResource, RawResourceTemplate, ReadResourceResult, Resource,
    ResourceContents, ResourceTemplate,
};
use rmcp::ErrorData as McpError;
use serde::Serialize;
use thiserror::Error;
use url::Url;
use user_manager_core::types::UserId;

use crate::server::{sanitize_internal_error, UserManagerMcp};

pub const USERS_URI: &str = "users://all";
pub const USER_DETAILS_TEMPLATE: &str = "users://{id}/profile";
pub const JSON_MIME: &str = "application/json";

const URI_SCHEME: &str = "users";
const ALL_HOST: &str = "all";
const PROFILE_PATH: &str = "/profile";

/// Why a profile URI did not yield a usable user ID.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ResourceIdError {
    #[error("ID parameter is required")]
    Missing,
    #[error("Invalid ID parameter - must be a number")]
    NotANumber,
}

/// A resource URI this server knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserResource {
    All,
    Details(Result<UserId, ResourceIdError>),
}

/// Match a URI against the registered resources.
///
/// For profiles the ID is taken from `?id=` when present, otherwise from the
/// `{id}` segment. Any non-negative integer is accepted; an ID no record has
/// (including 0) is reported as not found by the read. Returns `None` for URIs
/// no resource serves.
pub fn parse_resource_uri(uri: &str) -> Option<UserResource> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != URI_SCHEME {
        return None;
    }

    let host = url.host_str().unwrap_or_default();
    match url.path() {
        "" | "/" if host == ALL_HOST => Some(UserResource::All),
        PROFILE_PATH => {
            let query_id = url
                .query_pairs()
                .find(|(key, _)| key == "id")
                .map(|(_, value)| value.into_owned());
            let raw = query_id.unwrap_or_else(|| host.to_string());
            Some(UserResource::Details(parse_user_id(&raw)))
        }
        _ => None,
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, ResourceIdError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ResourceIdError::Missing);
    }
    raw.parse::<UserId>()
        .map_err(|_| ResourceIdError::NotANumber)
}

/// Static resources advertised by `resources/list`.
pub fn resource_list() -> Vec<Resource> {
    let mut users = RawResource::new(USERS_URI, "users");
    users.title = Some("Users".to_string());
    users.description = Some("Get all user data from database".to_string());
    users.mime_type = Some(JSON_MIME.to_string());
    vec![users.no_annotation()]
}

/// Templates advertised by `resources/templates/list`.
pub fn resource_template_list() -> Vec<ResourceTemplate> {
    let details = RawResourceTemplate {
        uri_template: USER_DETAILS_TEMPLATE.to_string(),
        name: "users-details".to_string(),
        title: Some("User Details".to_string()),
        description: Some("Get user detail data from database".to_string()),
        mime_type: Some(JSON_MIME.to_string()),
        icons: None,
    };
    vec![details.no_annotation()]
}

fn json_contents(
    uri: &str,
    value: &impl Serialize,
    context: &str,
) -> Result<ReadResourceResult, McpError> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| sanitize_internal_error(e, context))?;
    let mut contents = ResourceContents::text(text, uri);
    if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
        *mime_type = Some(JSON_MIME.to_string());
    }
    Ok(ReadResourceResult {
        contents: vec![contents],
    })
}

impl UserManagerMcp {
    /// Dispatch a `resources/read` request.
    pub(crate) async fn read_user_resource(
        &self,
        uri: &str,
    ) -> Result<ReadResourceResult, McpError> {
        match parse_resource_uri(uri) {
            Some(UserResource::All) => self.read_all_users(uri).await,
            Some(UserResource::Details(id)) => self.read_user_details(uri, id).await,
            None => {
                tracing::warn!(uri, "Unknown resource requested");
                Err(McpError::resource_not_found(
                    format!("Resource not found: {uri}"),
                    None,
                ))
            }
        }
    }

    async fn read_all_users(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        tracing::info!("Handling get all users resource request");

        let users = self.user_service.list_users().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to handle get all users resource");
            McpError::internal_error("Failed to retrieve users data", None)
        })?;

        json_contents(uri, &users, "Serialize users")
    }

    async fn read_user_details(
        &self,
        uri: &str,
        id: Result<UserId, ResourceIdError>,
    ) -> Result<ReadResourceResult, McpError> {
        let id = id.map_err(|e| {
            tracing::warn!(uri, error = %e, "Failed to handle get user by ID resource");
            McpError::invalid_params(e.to_string(), None)
        })?;

        tracing::info!("Handling get user by ID resource request for ID: {id}");

        let user = self.user_service.get_user(id).await.map_err(|e| {
            tracing::error!(uri, error = %e, "Failed to handle get user by ID resource");
            McpError::internal_error("Failed to retrieve user data", None)
        })?;

        let Some(user) = user else {
            tracing::warn!(uri, "User with ID {id} not found");
            return Err(McpError::resource_not_found(
                format!("User with ID {id} not found"),
                None,
            ));
        };

        json_contents(uri, &user, "Serialize user")
    }
}
