//! Cloud posture tools. Scan triggers and setting updates live in the write
//! bucket; template scans only evaluate the supplied template and are safe to
//! expose read-only.

use aegis_client::cloudposture::UpdateScanSettingsInput;
use aegis_client::ApiClient;
use reqwest::StatusCode;
use serde_json::json;

use crate::args::{
    ArgError, ArgumentMap, optional_bool_flag, optional_str, optional_str_int, optional_timestamp,
    required_str,
};
use crate::outcome::{ToolOutcome, expect_status};
use crate::registry::{Tool, ToolConstructor};

use super::{handler, paging_params};

pub(super) fn constructors() -> Vec<ToolConstructor> {
    vec![list_accounts, list_checks, run_template_scan, get_scan_settings]
}

pub(super) fn write_constructors() -> Vec<ToolConstructor> {
    vec![start_account_scan, update_scan_settings]
}

fn list_accounts(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_cloud_posture_accounts",
        description: "List cloud accounts connected to posture management.",
        input_schema: json!({
            "type": "object",
            "properties": {
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
    let params = paging_params(&args)?;
    let result = client.cloud_posture_list_accounts(&params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list cloud posture accounts").await)
}

fn list_checks(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_cloud_posture_checks",
        description: "List misconfiguration checks, optionally bounded by when they were evaluated.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string", "description": "Filter expression, e.g. riskLevel eq 'HIGH' and status eq 'FAILURE'" },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
                "startDateTime": { "type": "string", "description": "RFC 3339 lower bound on evaluation time" },
                "endDateTime": { "type": "string", "description": "RFC 3339 upper bound on evaluation time" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_checks),
    }
}

async fn run_list_checks(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let mut params = paging_params(&args)?;
    params.start_date_time = optional_timestamp(&args, "startDateTime")?;
    params.end_date_time = optional_timestamp(&args, "endDateTime")?;
    let result = client.cloud_posture_list_checks(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list cloud posture checks").await)
}

fn run_template_scan(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_run_template_scan",
        description: "Evaluate an infrastructure-as-code template against posture rules. Does not modify any cloud account.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "content": { "type": "string", "description": "Template body to evaluate" },
                "type": { "type": "string", "enum": ["cloudformation-template", "terraform-template"] },
            },
            "required": ["content", "type"],
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_run_template_scan),
    }
}

async fn run_run_template_scan(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let content = required_str(&args, "content")?;
    let template_type = required_str(&args, "type")?;
    let result = client
        .cloud_posture_scan_template(&content, &template_type)
        .await;
    Ok(expect_status(result, StatusCode::OK, "failed to run template scan").await)
}

fn get_scan_settings(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_scan_settings",
        description: "Get the scheduled scan settings of a cloud posture account.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "accountId": { "type": "string" },
            },
            "required": ["accountId"],
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_scan_settings),
    }
}

async fn run_get_scan_settings(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let account_id = required_str(&args, "accountId")?;
    let result = client.cloud_posture_get_scan_settings(&account_id).await;
    Ok(expect_status(result, StatusCode::OK, "failed to get scan settings").await)
}

fn start_account_scan(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_start_account_scan",
        description: "Trigger an on-demand posture scan of a cloud account.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "accountId": { "type": "string" },
            },
            "required": ["accountId"],
            "additionalProperties": false,
        }),
        read_only: false,
        handler: handler(client, run_start_account_scan),
    }
}

async fn run_start_account_scan(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let account_id = required_str(&args, "accountId")?;
    let result = client.cloud_posture_scan_account(&account_id).await;
    Ok(expect_status(result, StatusCode::ACCEPTED, "failed to start account scan").await)
}

fn update_scan_settings(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_update_scan_settings",
        description: "Update the scheduled scan settings of a cloud posture account. Omitted fields are left unchanged.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "accountId": { "type": "string" },
                "enabled": { "type": "boolean", "description": "Whether scheduled scans run at all" },
                "interval": { "type": "string", "description": "Hours between scheduled scans, as a decimal string" },
            },
            "required": ["accountId"],
            "additionalProperties": false,
        }),
        read_only: false,
        handler: handler(client, run_update_scan_settings),
    }
}

async fn run_update_scan_settings(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let account_id = required_str(&args, "accountId")?;
    let input = UpdateScanSettingsInput {
        enabled: optional_bool_flag(&args, "enabled")?,
        interval: optional_str_int(&args, "interval")?,
    };
    let result = client
        .cloud_posture_update_scan_settings(&account_id, &input)
        .await;
    Ok(expect_status(result, StatusCode::NO_CONTENT, "failed to update scan settings").await)
}
