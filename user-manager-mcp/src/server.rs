//! MCP Server implementation for User Manager.
//!
//! Exposes 4 tools, 1 resource, 1 resource template and 3 prompts over the
//! JSON user store.

use std::fmt::Debug;
use std::sync::Arc;

use rmcp::{
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolResult, Content, GetPromptRequestParams, GetPromptResult, Implementation,
        ListPromptsResult, ListResourceTemplatesResult,
        ListResourcesResult, PaginatedRequestParams, ProtocolVersion, ReadResourceRequestParams,
        ReadResourceResult, ServerCapabilities, ServerInfo,
    },
    prompt_handler,
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use serde_json::json;
use user_manager_core::error::CoreError;
use user_manager_core::services::UserService;
use user_manager_core::validation::Validate;

use crate::resources::{resource_list, resource_template_list};
use crate::schemas::{CreateUserParams, DeleteUserParams, GetUserParams, UpdateUserParams};

/// Sanitize error messages to prevent sensitive information leakage.
///
/// Logs the full error to stderr but returns a generic message to the client.
pub(crate) fn sanitize_internal_error(error: impl std::fmt::Display, context: &str) -> McpError {
    tracing::error!("{context} error: {error}");
    McpError::internal_error(
        format!("{context} failed - check server logs for details"),
        None,
    )
}

/// Reject arguments that deserialized but break a field rule.
fn gate(params: &impl Validate, tool: &str) -> Result<(), McpError> {
    params.validate().map_err(|e| {
        tracing::warn!(tool, error = %e, "Tool arguments rejected");
        McpError::invalid_params(e.to_string(), Some(json!({ "fields": e.errors() })))
    })
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

/// Render a failed store call as a tool-level error result.
///
/// Validation details are returned to the caller; storage details only reach
/// the log.
fn tool_failure(action: &str, input: &impl Debug, error: &CoreError) -> CallToolResult {
    let detail = match error {
        CoreError::Validation(e) => e.to_string(),
        CoreError::StorageRead(_) | CoreError::StorageWrite(_) => {
            "user storage is unavailable - check server logs for details".to_string()
        }
    };
    if error.is_expected() {
        tracing::warn!(?input, error = %error, "Failed to {action} user via MCP tool");
    } else {
        tracing::error!(?input, error = %error, "Failed to {action} user via MCP tool");
    }
    CallToolResult::error(vec![Content::text(format!(
        "Failed to {action} user: {detail}"
    ))])
}

fn not_found(id: u64) -> CallToolResult {
    text_result(format!("User with ID {id} not found"))
}

/// Name and version reported in the `initialize` handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
}

/// MCP Server for User Manager.
///
/// Provides AI agents with create, read, update and delete access to user
/// records through the Model Context Protocol.
#[derive(Clone)]
pub struct UserManagerMcp {
    /// User service for record operations.
    pub(crate) user_service: Arc<UserService>,
    /// Identity advertised to clients.
    identity: ServerIdentity,
    /// Tool router generated by macro.
    tool_router: ToolRouter<Self>,
    /// Prompt router generated by macro.
    prompt_router: PromptRouter<Self>,
}

impl UserManagerMcp {
    /// Create a new MCP server instance.
    #[must_use]
    pub fn new(user_service: Arc<UserService>, identity: ServerIdentity) -> Self {
        Self {
            user_service,
            identity,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }
}

#[tool_router]
impl UserManagerMcp {
    /// Create a new user.
    #[tool(
        name = "create-user",
        description = "Create a new user in the database",
        annotations(
            title = "Create User",
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = true
        )
    )]
    async fn create_user(
        &self,
        Parameters(params): Parameters<CreateUserParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(?params, "Creating user via MCP tool");
        gate(&params, "create-user")?;

        match self.user_service.create_user(params.clone().into()).await {
            Ok(user) => {
                tracing::info!(id = user.id, "User created via MCP tool");
                Ok(text_result(format!(
                    "User \"{}\" created successfully with ID {}",
                    user.name, user.id
                )))
            }
            Err(e) => Ok(tool_failure("create", &params, &e)),
        }
    }

    /// Update fields of an existing user.
    #[tool(
        name = "update-user",
        description = "Update an existing user in the database",
        annotations(
            title = "Update User",
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = true
        )
    )]
    async fn update_user(
        &self,
        Parameters(params): Parameters<UpdateUserParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(?params, "Updating user via MCP tool");
        gate(&params, "update-user")?;

        let (id, update) = params.clone().into_parts();
        match self.user_service.update_user(id, update).await {
            Ok(Some(user)) => Ok(text_result(format!(
                "User \"{}\" (ID: {id}) updated successfully",
                user.name
            ))),
            Ok(None) => {
                tracing::warn!(id, "Update target not found");
                Ok(not_found(id))
            }
            Err(e) => Ok(tool_failure("update", &params, &e)),
        }
    }

    /// Delete a user.
    #[tool(
        name = "delete-user",
        description = "Delete a user from the database",
        annotations(
            title = "Delete User",
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = false,
            open_world_hint = true
        )
    )]
    async fn delete_user(
        &self,
        Parameters(params): Parameters<DeleteUserParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(?params, "Deleting user via MCP tool");
        gate(&params, "delete-user")?;

        match self.user_service.delete_user(params.id).await {
            Ok(true) => Ok(text_result(format!(
                "User with ID {} deleted successfully",
                params.id
            ))),
            Ok(false) => {
                tracing::warn!(id = params.id, "Delete target not found");
                Ok(not_found(params.id))
            }
            Err(e) => Ok(tool_failure("delete", &params, &e)),
        }
    }

    /// Fetch a single user.
    #[tool(
        name = "get-user",
        description = "Get a specific user by ID",
        annotations(
            title = "Get User",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn get_user(
        &self,
        Parameters(params): Parameters<GetUserParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(?params, "Getting user via MCP tool");
        gate(&params, "get-user")?;

        match self.user_service.get_user(params.id).await {
            Ok(Some(user)) => {
                let json = serde_json::to_string_pretty(&user)
                    .map_err(|e| sanitize_internal_error(e, "Serialize user"))?;
                Ok(text_result(format!("User found: {json}")))
            }
            Ok(None) => Ok(not_found(params.id)),
            Err(e) => Ok(tool_failure("get", &params, &e)),
        }
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for UserManagerMcp {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name.clone_from(&self.identity.name);
        server_info.version.clone_from(&self.identity.version);

        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info,
            instructions: Some(
                "User Manager MCP Server - Manage user records (name, email, address, phone). \
                 Use create-user, update-user, delete-user and get-user to change or fetch a \
                 single user. Read users://all for every user or users://{id}/profile for one \
                 user. Prompts generate-fake-user, generate-user-report and generate-user-list \
                 produce ready-made instructions and do not touch stored data."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(resource_list()))
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult::with_all_items(
            resource_template_list(),
        ))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.read_user_resource(&request.uri).await
    }
}

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod test_mocks;

#[cfg(test)]
#[path = "server_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;

#[cfg(test)]
#[path = "client_integration_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod client_integration_tests;
