//! MCP prompts.
//!
//! Prompts only render text; they never read the user store.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{PromptMessage, PromptMessageRole};
use rmcp::{prompt, prompt_router, ErrorData as McpError};
use user_manager_core::validation::Validate;

use crate::schemas::{GenerateFakeUserParams, GenerateUserListParams, GenerateUserReportParams};
use crate::server::UserManagerMcp;

fn user_message(text: String) -> Vec<PromptMessage> {
    vec![PromptMessage::new_text(PromptMessageRole::User, text)]
}

/// Run the validation for a prompt, passing the failure text through unchanged.
fn check(params: &impl Validate, prompt: &str) -> Result<(), McpError> {
    params.validate().map_err(|e| {
        tracing::error!(prompt, error = %e, "Prompt arguments rejected");
        McpError::invalid_params(e.to_string(), None)
    })
}

pub(crate) fn fake_user_text(name: &str) -> String {
    format!(
        "Generate a fake user with the name \"{name}\" and return the details in JSON format \
         with the following structure:\n\
         {{\n  \"name\": \"string\",\n  \"email\": \"string (valid email format)\",\n  \
         \"address\": \"string (realistic address)\",\n  \"phone\": \"string (phone number)\"\n}}\n\n\
         Make sure the data is realistic and properly formatted."
    )
}

pub(crate) fn user_report_text(user_id: u64) -> String {
    format!(
        "Generate a detailed report for user with ID {user_id}. The report should include:\n\
         1. User profile summary\n\
         2. Account status\n\
         3. Recent activity (if available)\n\
         4. Recommendations or suggestions\n\n\
         Format the report in a clear, professional manner."
    )
}

pub(crate) fn user_list_text(params: &GenerateUserListParams) -> String {
    format!(
        "Generate a user list in {} format (limit to {} users). \
         Include the following information for each user:\n\
         - ID\n- Name\n- Email\n- Address\n- Phone\n\n\
         Make sure the data is well-formatted and easy to read.",
        params.format, params.limit
    )
}

#[prompt_router(vis = "pub(crate)")]
impl UserManagerMcp {
    #[prompt(
        name = "generate-fake-user",
        description = "Generate fake user based on given name"
    )]
    async fn generate_fake_user(
        &self,
        Parameters(params): Parameters<GenerateFakeUserParams>,
    ) -> Result<Vec<PromptMessage>, McpError> {
        tracing::info!(name = %params.name, "Generating fake user prompt");
        check(&params, "generate-fake-user")?;
        Ok(user_message(fake_user_text(&params.name)))
    }

    #[prompt(
        name = "generate-user-report",
        description = "Generate a detailed report for a specific user"
    )]
    async fn generate_user_report(
        &self,
        Parameters(params): Parameters<GenerateUserReportParams>,
    ) -> Result<Vec<PromptMessage>, McpError> {
        tracing::info!(user_id = params.user_id, "Generating user report prompt");
        check(&params, "generate-user-report")?;
        Ok(user_message(user_report_text(params.user_id)))
    }

    #[prompt(
        name = "generate-user-list",
        description = "Generate a formatted list of users"
    )]
    async fn generate_user_list(
        &self,
        Parameters(params): Parameters<GenerateUserListParams>,
    ) -> Result<Vec<PromptMessage>, McpError> {
        tracing::info!(
            format = %params.format,
            limit = params.limit,
            "Generating user list prompt"
        );
        check(&params, "generate-user-list")?;
        Ok(user_message(user_list_text(&params)))
    }
}
