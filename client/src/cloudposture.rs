//! Cloud posture endpoints.

use reqwest::Response;
use serde::Serialize;
use serde_json::json;

use crate::client::ApiClient;
use crate::error::Result;
use crate::query::QueryParameters;

/// Scan-setting update. `enabled` distinguishes "leave unchanged" (`None`)
/// from an explicit `false`; a zero `interval` is left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateScanSettingsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "is_zero")]
    pub interval: i64,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl ApiClient {
    pub async fn cloud_posture_list_accounts(&self, params: &QueryParameters) -> Result<Response> {
        self.search_and_filter("beta/cloudPosture/accounts", "", params)
            .await
    }

    pub async fn cloud_posture_list_checks(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("beta/cloudPosture/checks", filter, params)
            .await
    }

    pub async fn cloud_posture_scan_template(
        &self,
        content: &str,
        template_type: &str,
    ) -> Result<Response> {
        let body = json!({
            "content": content,
            "type": template_type,
        });
        self.post_json("beta/cloudPosture/scanTemplate", &body).await
    }

    pub async fn cloud_posture_scan_account(&self, account_id: &str) -> Result<Response> {
        self.post_empty(&format!("beta/cloudPosture/accounts/{account_id}/scan"))
            .await
    }

    pub async fn cloud_posture_get_scan_settings(&self, account_id: &str) -> Result<Response> {
        self.get(&format!(
            "beta/cloudPosture/accounts/{account_id}/scanSetting"
        ))
        .await
    }

    pub async fn cloud_posture_update_scan_settings(
        &self,
        account_id: &str,
        input: &UpdateScanSettingsInput,
    ) -> Result<Response> {
        self.patch_json(
            &format!("beta/cloudPosture/accounts/{account_id}/scanSetting"),
            input,
        )
        .await
    }
}
