//! Credit allocation and usage tools.

use aegis_client::ApiClient;
use reqwest::StatusCode;
use serde_json::json;

use crate::args::{ArgError, ArgumentMap, optional_str};
use crate::outcome::{ToolOutcome, expect_status};
use crate::registry::{Tool, ToolConstructor};

use super::{handler, paging_params};

pub(super) fn constructors() -> Vec<ToolConstructor> {
    vec![
        get_allocation,
        get_balance,
        get_usage_statistics,
        get_service_limits,
    ]
}

fn get_allocation(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_credits_allocation",
        description: "Show how purchased credits are allocated across services.",
        input_schema: json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_allocation),
    }
}

async fn run_get_allocation(
    client: ApiClient,
    _args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let result = client.credits_get_allocation().await;
    Ok(expect_status(result, StatusCode::OK, "failed to get credits allocation").await)
}

fn get_balance(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_credits_balance",
        description: "Show the remaining credit balance.",
        input_schema: json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_balance),
    }
}

async fn run_get_balance(client: ApiClient, _args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let result = client.credits_get_balance().await;
    Ok(expect_status(result, StatusCode::OK, "failed to get credits balance").await)
}

fn get_usage_statistics(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_credits_usage",
        description: "Show credit consumption statistics, optionally narrowed by a filter expression.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string", "description": "Filter expression, e.g. serviceName eq 'endpointSecurity'" },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_usage_statistics),
    }
}

async fn run_get_usage_statistics(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.credits_get_usage_statistics(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to get credits usage").await)
}

fn get_service_limits(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_service_limits",
        description: "Show per-service consumption limits and current usage against them.",
        input_schema: json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_service_limits),
    }
}

async fn run_get_service_limits(
    client: ApiClient,
    _args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let result = client.credits_get_service_limits().await;
    Ok(expect_status(result, StatusCode::OK, "failed to get service limits").await)
}
