//! Exposure management (attack surface) tools.

use aegis_client::ApiClient;
use reqwest::StatusCode;
use serde_json::json;

use crate::args::{ArgError, ArgumentMap, optional_str, optional_timestamp, required_str};
use crate::outcome::{ToolOutcome, expect_status};
use crate::registry::{Tool, ToolConstructor};

use super::{handler, ordering_values, paging_params};

pub(super) fn constructors() -> Vec<ToolConstructor> {
    vec![
        list_devices,
        list_domain_accounts,
        list_public_ips,
        list_cloud_assets,
        get_cloud_asset,
        list_cloud_asset_risk_events,
        list_high_risk_users,
        get_security_posture,
    ]
}

fn list_devices(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_attack_surface_devices",
        description: "List discovered devices in the attack surface.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string", "description": "Filter expression, e.g. riskLevel eq 'high'" },
                "orderBy": { "type": "string", "enum": ordering_values(&["lastDetectedDateTime", "riskScore"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "nextBatchToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_devices),
    }
}

async fn run_list_devices(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.exposure_list_devices(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list attack surface devices").await)
}

fn list_domain_accounts(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_domain_accounts",
        description: "List discovered domain accounts in the attack surface.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string" },
                "orderBy": { "type": "string", "enum": ordering_values(&["lastDetectedDateTime", "riskScore"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "nextBatchToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_domain_accounts),
    }
}

async fn run_list_domain_accounts(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.exposure_list_domain_accounts(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list domain accounts").await)
}

fn list_public_ips(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_public_ip_addresses",
        description: "List discovered public IP addresses in the attack surface.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string" },
                "orderBy": { "type": "string", "enum": ordering_values(&["lastDetectedDateTime", "riskScore"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "nextBatchToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_public_ips),
    }
}

async fn run_list_public_ips(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.exposure_list_public_ips(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list public IP addresses").await)
}

fn list_cloud_assets(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_cloud_assets",
        description: "List discovered cloud assets in the attack surface, optionally bounded by first-seen window.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string", "description": "Filter expression, e.g. provider eq 'aws'" },
                "orderBy": { "type": "string", "enum": ordering_values(&["firstSeenDateTime", "lastDetectedDateTime", "riskScore"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "nextBatchToken": { "type": "string" },
                "firstSeenStartDateTime": { "type": "string", "description": "RFC 3339 lower bound on first-seen time" },
                "firstSeenEndDateTime": { "type": "string", "description": "RFC 3339 upper bound on first-seen time" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_cloud_assets),
    }
}

async fn run_list_cloud_assets(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let mut params = paging_params(&args)?;
    params.first_seen_start_date_time = optional_timestamp(&args, "firstSeenStartDateTime")?;
    params.first_seen_end_date_time = optional_timestamp(&args, "firstSeenEndDateTime")?;
    let result = client.exposure_list_cloud_assets(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list cloud assets").await)
}

fn get_cloud_asset(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_cloud_asset",
        description: "Get one discovered cloud asset.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "resourceId": { "type": "string" },
            },
            "required": ["resourceId"],
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_cloud_asset),
    }
}

async fn run_get_cloud_asset(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let resource_id = required_str(&args, "resourceId")?;
    let result = client.exposure_get_cloud_asset(&resource_id).await;
    Ok(expect_status(result, StatusCode::OK, "failed to get cloud asset").await)
}

fn list_cloud_asset_risk_events(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_cloud_asset_risk_events",
        description: "List risk indicator events observed on a cloud asset, optionally bounded by detection window.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "resourceId": { "type": "string" },
                "filter": { "type": "string" },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "nextBatchToken": { "type": "string" },
                "detectedStartDateTime": { "type": "string", "description": "RFC 3339 lower bound on detection time" },
                "detectedEndDateTime": { "type": "string", "description": "RFC 3339 upper bound on detection time" },
            },
            "required": ["resourceId"],
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_cloud_asset_risk_events),
    }
}

async fn run_list_cloud_asset_risk_events(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let resource_id = required_str(&args, "resourceId")?;
    let filter = optional_str(&args, "filter")?;
    let mut params = paging_params(&args)?;
    params.detected_start_date_time = optional_timestamp(&args, "detectedStartDateTime")?;
    params.detected_end_date_time = optional_timestamp(&args, "detectedEndDateTime")?;
    let result = client
        .exposure_list_cloud_asset_risk_events(&resource_id, &filter, &params)
        .await;
    Ok(expect_status(result, StatusCode::OK, "failed to list risk indicator events").await)
}

fn list_high_risk_users(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_high_risk_users",
        description: "List users currently assessed as high risk.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string" },
                "orderBy": { "type": "string", "enum": ordering_values(&["riskScore", "lastDetectedDateTime"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "nextBatchToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_high_risk_users),
    }
}

async fn run_list_high_risk_users(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.exposure_list_high_risk_users(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list high risk users").await)
}

fn get_security_posture(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_security_posture",
        description: "Get the overall security posture summary, including risk score trends.",
        input_schema: json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_security_posture),
    }
}

async fn run_get_security_posture(
    client: ApiClient,
    _args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let result = client.exposure_get_security_posture().await;
    Ok(expect_status(result, StatusCode::OK, "failed to get security posture").await)
}
