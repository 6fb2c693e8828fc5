//! Exposure management (attack surface) endpoints.

use reqwest::Response;

use crate::client::ApiClient;
use crate::error::Result;
use crate::query::QueryParameters;

impl ApiClient {
    pub async fn exposure_list_devices(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/exposure/attackSurfaceDevices", filter, params)
            .await
    }

    pub async fn exposure_list_domain_accounts(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/exposure/attackSurfaceDomainAccounts", filter, params)
            .await
    }

    pub async fn exposure_list_public_ips(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter(
            "v3.0/exposure/attackSurfacePublicIpAddresses",
            filter,
            params,
        )
        .await
    }

    pub async fn exposure_list_cloud_assets(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/exposure/attackSurfaceCloudAssets", filter, params)
            .await
    }

    pub async fn exposure_get_cloud_asset(&self, resource_id: &str) -> Result<Response> {
        self.get(&format!("v3.0/exposure/attackSurfaceCloudAssets/{resource_id}"))
            .await
    }

    pub async fn exposure_list_cloud_asset_risk_events(
        &self,
        resource_id: &str,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter(
            &format!("v3.0/exposure/attackSurfaceCloudAssets/{resource_id}/riskIndicatorEvents"),
            filter,
            params,
        )
        .await
    }

    pub async fn exposure_list_high_risk_users(
        &self,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        self.search_and_filter("v3.0/exposure/highRiskUsers", filter, params)
            .await
    }

    pub async fn exposure_get_security_posture(&self) -> Result<Response> {
        self.get("v3.0/exposure/securityPosture").await
    }
}
