//! Container security tools.

use aegis_client::ApiClient;
use reqwest::StatusCode;
use serde_json::json;

use crate::args::{ArgError, ArgumentMap, optional_str, optional_timestamp, required_str};
use crate::outcome::{ToolOutcome, expect_status};
use crate::registry::{Tool, ToolConstructor};

use super::{handler, ordering_values, paging_params};

pub(super) fn constructors() -> Vec<ToolConstructor> {
    vec![
        list_policies,
        get_policy,
        list_runtime_rules,
        list_rulesets,
        list_k8s_clusters,
        get_k8s_cluster,
        list_image_vulnerabilities,
    ]
}

fn list_policies(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_container_policies",
        description: "List container protection policies.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string" },
                "orderBy": { "type": "string", "enum": ordering_values(&["createdDateTime", "updatedDateTime", "name"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_policies),
    }
}

async fn run_list_policies(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.container_list_policies(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list container policies").await)
}

fn get_policy(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_container_policy",
        description: "Get one container protection policy.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "policyId": { "type": "string" },
            },
            "required": ["policyId"],
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_policy),
    }
}

async fn run_get_policy(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let policy_id = required_str(&args, "policyId")?;
    let result = client.container_get_policy(&policy_id).await;
    Ok(expect_status(result, StatusCode::OK, "failed to get container policy").await)
}

fn list_runtime_rules(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_container_runtime_rules",
        description: "List managed runtime security rules for containers.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string" },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_runtime_rules),
    }
}

async fn run_list_runtime_rules(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.container_list_runtime_rules(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list runtime rules").await)
}

fn list_rulesets(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_container_rulesets",
        description: "List container runtime rulesets.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string" },
                "orderBy": { "type": "string", "enum": ordering_values(&["createdDateTime", "updatedDateTime", "name"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_rulesets),
    }
}

async fn run_list_rulesets(client: ApiClient, args: ArgumentMap) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.container_list_rulesets(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list rulesets").await)
}

fn list_k8s_clusters(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_k8s_clusters",
        description: "List registered Kubernetes clusters.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string", "description": "Filter expression, e.g. policyId eq 'LogOnlyPolicy-xxx'" },
                "orderBy": { "type": "string", "enum": ordering_values(&["createdDateTime", "updatedDateTime", "name"]) },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_k8s_clusters),
    }
}

async fn run_list_k8s_clusters(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let params = paging_params(&args)?;
    let result = client.container_list_k8s_clusters(&filter, &params).await;
    Ok(expect_status(result, StatusCode::OK, "failed to list Kubernetes clusters").await)
}

fn get_k8s_cluster(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_get_k8s_cluster",
        description: "Get one registered Kubernetes cluster.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "clusterId": { "type": "string" },
            },
            "required": ["clusterId"],
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_get_k8s_cluster),
    }
}

async fn run_get_k8s_cluster(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let cluster_id = required_str(&args, "clusterId")?;
    let result = client.container_get_k8s_cluster(&cluster_id).await;
    Ok(expect_status(result, StatusCode::OK, "failed to get Kubernetes cluster").await)
}

fn list_image_vulnerabilities(client: &ApiClient) -> Tool {
    Tool {
        name: "aegis_list_container_vulnerabilities",
        description: "List vulnerabilities detected in container images, optionally bounded by detection window.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "filter": { "type": "string", "description": "Filter expression, e.g. cvssScore gt 7" },
                "top": { "type": "integer", "enum": [10, 50, 100, 200], "default": 10 },
                "skipToken": { "type": "string" },
                "detectedStartDateTime": { "type": "string", "description": "RFC 3339 lower bound on detection time" },
                "detectedEndDateTime": { "type": "string", "description": "RFC 3339 upper bound on detection time" },
            },
            "additionalProperties": false,
        }),
        read_only: true,
        handler: handler(client, run_list_image_vulnerabilities),
    }
}

async fn run_list_image_vulnerabilities(
    client: ApiClient,
    args: ArgumentMap,
) -> Result<ToolOutcome, ArgError> {
    let filter = optional_str(&args, "filter")?;
    let mut params = paging_params(&args)?;
    params.detected_start_date_time = optional_timestamp(&args, "detectedStartDateTime")?;
    params.detected_end_date_time = optional_timestamp(&args, "detectedEndDateTime")?;
    let result = client
        .container_list_image_vulnerabilities(&filter, &params)
        .await;
    Ok(expect_status(result, StatusCode::OK, "failed to list container vulnerabilities").await)
}
