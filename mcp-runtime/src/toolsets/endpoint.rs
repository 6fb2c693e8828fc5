//! Endpoint security tools.

use aegis_client::ApiClient;
use reqwest::StatusCode;
use serde_json::json;

use crate::args::{ArgError, ArgumentMap, optional_str, required_str};
use crate::outcome::{ToolOutcome, expect_status};
use crate::registry::{Tool, ToolConstructor};

use super::{handler, ordering_values, paging_params};

pub(super) fn constructors() -> Vec<ToolConstructor> {
    vec![
        list_endpoints,
        get_endpoint,
        list_tasks,
        get_task,
        list_version_control_policies,
        list_agent_update_policies,
    ]
}

fn list_endpoints(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_endpoints",
        description: "List protected endpoints and their agent status.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string", "description": "Filter expression, e.g. osName eq 'Windows'" },
                "orderBy": { "type": "string", "enum": ordering_values(&["endpointName", "lastUsedIp", "osName"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_endpoints),
    }
}

async fn run_list_endpoints(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.endpoint_list_endpoints(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list endpoints").await)
}

fn get_endpoint(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_endpoint",
        description: "Get one protected endpoint by its agent GUID.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "endpointId": { "type": "string", "description": "Agent GUID of the endpoint" },
            },
            "required": ["endpointId"],
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_endpoint),
    }
}

async fn run_get_endpoint(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let endpoint_id = required_str(&args, "endpointId")?;
    let result = client.endpoint_get_endpoint(&endpoint_id).await;
    Ok(expect_status(result, StatusCode::OK, "failed to get endpoint").await)
}

fn list_tasks(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_endpoint_tasks",
        description: "List response tasks issued to endpoints.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string", "description": "Filter expression, e.g. status eq 'succeeded'" },
                "orderBy": { "type": "string", "enum": ordering_values(&["createdDateTime", "lastActionDateTime"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_tasks),
    }
}

async fn run_list_tasks(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.endpoint_list_tasks(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list endpoint tasks").await)
}

fn get_task(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_endpoint_task",
        description: "Get one endpoint response task.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "taskId": { "type": "string" },
            },
            "required": ["taskId"],
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_task),
    }
}

async fn run_get_task(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let task_id = required_str(&args, "taskId")?;
    let result = client.endpoint_get_task(&task_id).await;
    Ok(expect_status(result, StatusCode::OK, "failed to get endpoint task").await)
}

fn list_version_control_policies(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_version_control_policies",
        description: "List agent version control policies.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_version_control_policies),
    }
}

async fn run_list_version_control_policies(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let params = paging_params(&args)?;
    let result = client.endpoint_list_version_control_policies(&params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list version control policies").await)
}

fn list_agent_update_policies(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_agent_update_policies",
        description: "List the agent update windows configured for version control policies.",
        input_schema: json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_agent_update_policies),
    }
}

async fn run_list_agent_update_policies(
    client: ApiClient,
    _args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let result = client.endpoint_list_agent_update_policies().await;
    Ok(expect_status(result, StatusCode::OK, "failed to list agent update policies").await)
}
