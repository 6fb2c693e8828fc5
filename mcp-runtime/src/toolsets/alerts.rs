//! Workbench alert tools.

use aegis_client::ApiClient;
use reqwest::StatusCode;
use serde_json::json;

use crate::args::{ArgError, ArgumentMap, optional_str, optional_timestamp, required_str};
use crate::outcome::{ToolOutcome, expect_status};
use crate::registry::{Tool, ToolConstructor};

use super::{handler, ordering_values, paging_params};

pub(super) fn constructors() -> Vec<ToolConstructor> {
    vec![list_alerts, get_alert, list_alert_notes]
}

fn list_alerts(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_alerts",
        description: "List workbench alerts, optionally narrowed by filter and detection window.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string", "description": "Filter expression, e.g. severity eq 'high'" },
                "orderBy": { "type": "string", "enum": ordering_values(&["createdDateTime", "updatedDateTime", "score", "severity"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
                "startDateTime": { "type": "string", "description": "RFC 3339 lower bound on creation time" },
                "endDateTime": { "type": "string", "description": "RFC 3339 upper bound on creation time" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_alerts),
    }
}

async fn run_list_alerts(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let mut params = paging_params(&args)?;
    params.start_date_time = optional_timestamp(&args, "startDateTime")?;
    params.end_date_time = optional_timestamp(&args, "endDateTime")?;
    let result = client.alerts_list(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list alerts").await)
}

fn get_alert(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_alert",
        description: "Get the details of one workbench alert.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "alertId": { "type": "string", "description": "Workbench alert ID, e.g. WB-14-20240501-00001" },
            },
            "required": ["alertId"],
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_alert),
    }
}

async fn run_get_alert(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let alert_id = required_str(&args, "alertId")?;
    let result = client.alert_get(&alert_id).await;
    Ok(expect_status(result, StatusCode::OK, "failed to get alert").await)
}

fn list_alert_notes(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_alert_notes",
        description: "List investigation notes attached to a workbench alert.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "alertId": { "type": "string" },
                "filter": { "type": "string" },
                "orderBy": { "type": "string", "enum": ordering_values(&["createdDateTime", "lastUpdatedDateTime"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
            },
            "required": ["alertId"],
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_alert_notes),
    }
}

async fn run_list_alert_notes(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let alert_id = required_str(&args, "alertId")?;
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.alert_notes_list(&alert_id, &filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list alert notes").await)
}
