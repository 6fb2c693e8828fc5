//! Alert investigation endpoints.

use reqwest::Response;

use crate::client::ApiClient;
use crate::error::Result;
use crate::query::QueryParameters;

impl ApiClient {
    pub async fn alerts_list(&self, filter: &str, params: &QueryParameters) -> Result<Response> {
        self.search_and_filter("v3.0/alerts", filter, params).await
    }

    pub async fn alert_get(&self, alert_id: &str) -> Result<Response> {
        self.get(&format!("v3.0/alerts/{alert_id}")).await
    }

    pub async fn alert_notes_list(
        &self,
        alert_id: &str,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter(&format!("v3.0/alerts/{alert_id}/notes"), filter, params)
            .await
    }
}
