//! Email asset inventory tools.

use aegis_client::ApiClient;
use reqwest::StatusCode;
use serde_json::json;

use crate::args::{ArgError, ArgumentMap, optional_str};
use crate::outcome::{ToolOutcome, expect_status};
use crate::registry::{Tool, ToolConstructor};

use super::{handler, ordering_values, paging_params};

pub(super) fn constructors() -> Vec<ToolConstructor> {
    vec![list_email_accounts, list_email_domains, list_email_servers]
}

fn list_email_accounts(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_email_accounts",
        description: "List email accounts in the asset inventory.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string", "description": "Filter expression, e.g. riskLevel eq 'high'" },
                "orderBy": { "type": "string", "enum": ordering_values(&["lastDetectedDateTime", "riskLevel"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "nextBatchToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_email_accounts),
    }
}

async fn run_list_email_accounts(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.email_list_accounts(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list email accounts").await)
}

fn list_email_domains(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_email_domains",
        description: "List email domains in the asset inventory.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string" },
                "orderBy": { "type": "string", "enum": ordering_values(&["lastDetectedDateTime", "riskLevel"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "nextBatchToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_email_domains),
    }
}

async fn run_list_email_domains(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.email_list_domains(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list email domains").await)
}

fn list_email_servers(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_email_servers",
        description: "List email servers in the asset inventory.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string" },
                "orderBy": { "type": "string", "enum": ordering_values(&["lastDetectedDateTime", "riskLevel"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "nextBatchToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_email_servers),
    }
}

async fn run_list_email_servers(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.email_list_servers(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list email servers").await)
}
