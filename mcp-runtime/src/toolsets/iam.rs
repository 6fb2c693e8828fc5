//! Identity and access management tools.

use aegis_client::iam::{InviteAccountInput, UpdateAccountInput};
use aegis_client::ApiClient;
use reqwest::StatusCode;
use serde_json::json;

use crate::args::{ArgError, ArgumentMap, optional_str, optional_string_array, required_str};
use crate::outcome::{ToolOutcome, expect_status};
use crate::registry::{Tool, ToolConstructor};

use super::{handler, ordering_values, paging_params};

pub(super) fn constructors() -> Vec<ToolConstructor> {
    vec![list_api_keys, list_accounts, get_account]
}

pub(super) fn write_constructors() -> Vec<ToolConstructor> {
    vec![delete_api_keys, invite_account, update_account, delete_account]
}

fn list_api_keys(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_api_keys",
        description: "List API keys, optionally narrowed by a filter expression.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string", "description": "Filter expression, e.g. status eq 'active'" },
                "orderBy": { "type": "string", "enum": ordering_values(&["createdDateTime", "lastUsedDateTime", "expiredDateTime"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_api_keys),
    }
}

async fn run_list_api_keys(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.iam_list_api_keys(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list API keys").await)
}

fn list_accounts(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_accounts",
        description: "List user accounts in the business.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string", "description": "Filter expression, e.g. status eq 'enabled'" },
                "orderBy": { "type": "string", "enum": ordering_values(&["createdDateTime", "lastActionDateTime"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_accounts),
    }
}

async fn run_list_accounts(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.iam_list_accounts(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list accounts").await)
}

fn get_account(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_account",
        description: "Get one user account by its identifier.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "accountId": { "type": "string", "description": "Account identifier (email or ID)" },
            },
            "required": ["accountId"],
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_account),
    }
}

async fn run_get_account(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let account_id = required_str(&args, "accountId")?;
    let result = client.iam_get_account(&account_id).await;
    Ok(expect_status(result, StatusCode::OK, "failed to get account").await)
}

fn delete_api_keys(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_delete_api_keys",
        description: "Delete one or more API keys by ID. Per-key results are reported individually.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "ids": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "API key IDs to delete",
                },
            },
            "required": ["ids"],
            "additionalProperties": false,
        }),
        read_only: false,
        handler: handler(client, run_delete_api_keys),
    }
}

async fn run_delete_api_keys(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let ids = optional_string_array(&args, "ids")?;
    if ids.is_empty() {
        return Err(ArgError::MissingParameter("ids".to_string()));
    }
    let result = client.iam_delete_api_keys(&ids).await;
    // Multi-status: the body carries the per-key outcomes.
    Ok(expect_status(result, StatusCode::MULTI_STATUS, "failed to delete API keys").await)
}

fn invite_account(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_invite_account",
        description: "Invite a new user account by email.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "email": { "type": "string" },
                "role": { "type": "string", "description": "Role ID to assign" },
                "authType": { "type": "string", "enum": ["local", "saml"], "default": "local" },
                "description": { "type": "string" },
            },
            "required": ["email", "role"],
            "additionalProperties": false,
        }),
        read_only: false,
        handler: handler(client, run_invite_account),
    }
}

async fn run_invite_account(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let mut auth_type = optional_str(&args, "authType")?;
    if auth_type.is_empty() {
        auth_type = "local".to_string();
    }
    let input = InviteAccountInput {
        email: required_str(&args, "email")?,
        role: required_str(&args, "role")?,
        auth_type,
        description: optional_str(&args, "description")?,
    };
    let result = client.iam_invite_account(&input).await;
    Ok(expect_status(result, StatusCode::CREATED, "failed to invite account").await)
}

fn update_account(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_update_account",
        description: "Update a user account's role, status, or description. Omitted fields are left unchanged.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "accountId": { "type": "string" },
                "role": { "type": "string" },
                "status": { "type": "string", "enum": ["enabled", "disabled"] },
                "description": { "type": "string" },
            },
            "required": ["accountId"],
            "additionalProperties": false,
        }),
        read_only: false,
        handler: handler(client, run_update_account),
    }
}

async fn run_update_account(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let account_id = required_str(&args, "accountId")?;
    let input = UpdateAccountInput {
        role: optional_str(&args, "role")?,
        status: optional_str(&args, "status")?,
        description: optional_str(&args, "description")?,
    };
    let result = client.iam_update_account(&account_id, &input).await;
    Ok(expect_status(result, StatusCode::NO_CONTENT, "failed to update account").await)
}

fn delete_account(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_delete_account",
        description: "Delete a user account.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "accountId": { "type": "string" },
            },
            "required": ["accountId"],
            "additionalProperties": false,
        }),
        read_only: false,
        handler: handler(client, run_delete_account),
    }
}

async fn run_delete_account(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let account_id = required_str(&args, "accountId")?;
    let result = client.iam_delete_account(&account_id).await;
    Ok(expect_status(result, StatusCode::NO_CONTENT, "failed to delete account").await)
}
