//! Endpoint security endpoints.

use reqwest::Response;

use crate::client::ApiClient;
use crate::error::Result;
use crate::query::QueryParameters;

impl ApiClient {
    pub async fn endpoint_list_endpoints(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/endpointSecurity/endpoints", filter, params)
            .await
    }

    pub async fn endpoint_get_endpoint(&self, endpoint_id: &str) -> Result<Response> {
        self.get(&format!("v3.0/endpointSecurity/endpoints/{endpoint_id}"))
            .await
    }

    pub async fn endpoint_list_tasks(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/endpointSecurity/tasks", filter, params)
            .await
    }

    pub async fn endpoint_get_task(&self, task_id: &str) -> Result<Response> {
        self.get(&format!("v3.0/endpointSecurity/tasks/{task_id}"))
            .await
    }

    pub async fn endpoint_list_version_control_policies(
        &self,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/endpointSecurity/versionControlPolicies", "", params)
            .await
    }

    pub async fn endpoint_list_agent_update_policies(&self) -> Result<Response> {
        self.get("v3.0/endpointSecurity/versionControlPolicies/agentUpdatePolicies")
            .await
    }
}
