//! Credit allocation and usage endpoints.

use reqwest::Response;

use crate::client::ApiClient;
use crate::error::Result;
use crate::query::QueryParameters;

impl ApiClient {
    pub async fn credits_get_allocation(&self) -> Result<Response> {
        self.get("v3.0/credits/allocation").await
    }

    pub async fn credits_get_balance(&self) -> Result<Response> {
        self.get("v3.0/credits/balance").await
    }

    pub async fn credits_get_usage_statistics(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/credits/usage/statistics", filter, params)
            .await
    }

    pub async fn credits_get_service_limits(&self) -> Result<Response> {
        self.get("v3.0/credits/limits").await
    }
}
