//! Email asset inventory endpoints.

use reqwest::Response;

use crate::client::ApiClient;
use crate::error::Result;
use crate::query::QueryParameters;

impl ApiClient {
    pub async fn email_list_accounts(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/emailInventory/emailAccounts", filter, params)
            .await
    }

    pub async fn email_list_domains(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/emailInventory/emailDomains", filter, params)
            .await
    }

    pub async fn email_list_servers(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/emailInventory/emailServers", filter, params)
            .await
    }
}
