//! Identity and access management endpoints.

use reqwest::Response;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::query::QueryParameters;

#[derive(Debug, Serialize)]
struct DeleteApiKey {
    id: String,
}

/// Input for inviting a new account.
#[derive(Debug, Clone, Serialize)]
pub struct InviteAccountInput {
    pub email: String,
    pub role: String,
    #[serde(rename = "authType")]
    pub auth_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Partial-update input for an account. Empty fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAccountInput {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl ApiClient {
    pub async fn iam_list_api_keys(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/iam/apiKeys", filter, params)
            .await
    }

    pub async fn iam_delete_api_keys(&self, api_key_ids: &[String]) -> Result<Response> {
        let body: Vec<DeleteApiKey> = api_key_ids
            .iter()
            .map(|id| DeleteApiKey { id: id.clone() })
            .collect();
        self.post_json("v3.0/iam/apiKeys/delete", &body).await
    }

    pub async fn iam_list_accounts(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/iam/accounts", filter, params)
            .await
    }

    pub async fn iam_get_account(&self, account_id: &str) -> Result<Response> {
        self.get(&format!("v3.0/iam/accounts/{account_id}")).await
    }

    pub async fn iam_invite_account(&self, input: &InviteAccountInput) -> Result<Response> {
        self.post_json("v3.0/iam/accounts", input).await
    }

    pub async fn iam_update_account(
        &self,
        account_id: &str,
        input: &UpdateAccountInput,
    ) -> Result<Response> {
        self.patch_json(&format!("v3.0/iam/accounts/{account_id}"), input)
            .await
    }

    pub async fn iam_delete_account(&self, account_id: &str) -> Result<Response> {
        self.delete(&format!("v3.0/iam/accounts/{account_id}"))
            .await
    }
}
