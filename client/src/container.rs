//! Container security endpoints.

use reqwest::Response;

use crate::client::ApiClient;
use crate::error::Result;
use crate::query::QueryParameters;

impl ApiClient {
    pub async fn container_list_policies(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/containerSecurity/policies", filter, params)
            .await
    }

    pub async fn container_get_policy(&self, policy_id: &str) -> Result<Response> {
        self.get(&format!("v3.0/containerSecurity/policies/{policy_id}"))
            .await
    }

    pub async fn container_list_runtime_rules(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/containerSecurity/managedRules", filter, params)
            .await
    }

    pub async fn container_list_rulesets(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/containerSecurity/rulesets", filter, params)
            .await
    }

    pub async fn container_list_k8s_clusters(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/containerSecurity/kubernetesClusters", filter, params)
            .await
    }

    pub async fn container_get_k8s_cluster(&self, cluster_id: &str) -> Result<Response> {
        self.get(&format!(
            "v3.0/containerSecurity/kubernetesClusters/{cluster_id}"
        ))
        .await
    }

    pub async fn container_list_image_vulnerabilities(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/containerSecurity/vulnerabilities", filter, params)
            .await
    }
}
