//! Client construction and request building.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Method, Response};
use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};
use crate::query::QueryParameters;

/// Region codes with an Aegis One deployment.
pub const VALID_REGIONS: &[&str] = &["au", "eu", "in", "jp", "sg", "us", "mea"];

/// Header carrying a server-side filter expression. Never sent empty.
pub const FILTER_HEADER: &str = "Aegis-Filter";

/// Aegis One API client.
///
/// Cheap to clone; the HTTP connection pool and configuration are shared and
/// never mutated after construction, so clones are safe to use concurrently.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    api_key: String,
    base_url: Url,
    user_agent: String,
}

/// Options for creating an [`ApiClient`].
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// API key sent as the bearer credential on every request.
    pub api_key: String,
    /// The Aegis One service region, e.g. `"us"` or `"eu"`.
    pub region: Option<String>,
    /// Explicit host override for pre-production environments. Mutually
    /// exclusive with `region`. A bare host is wrapped as `https://{host}/`;
    /// a value carrying a scheme is used as-is.
    pub host: Option<String>,
    /// Overrides the default `aegis-client/{version}` user agent.
    pub user_agent: Option<String>,
}

/// A pure transformation applied to an outbound request description.
///
/// Options are applied in the order supplied, after the headers every
/// request carries (authorization, user agent).
#[derive(Debug, Clone)]
pub enum RequestOption {
    /// Add a single header. Skipped entirely when the value is empty, so
    /// optional filter headers never appear as empty strings.
    Header(&'static str, String),
    /// Replace the query string with the given key/value pairs. An empty
    /// list clears the query string.
    Query(Vec<(String, String)>),
    /// Mark the body as JSON.
    JsonContentType,
}

/// Request description the options operate on, before it becomes a
/// `reqwest::Request`.
struct RequestParts {
    url: Url,
    headers: HeaderMap,
}

impl RequestOption {
    fn apply(&self, mut parts: RequestParts) -> Result<RequestParts> {
        match self {
            RequestOption::Header(name, value) => {
                if !value.is_empty() {
                    let header_name = HeaderName::try_from(*name)
                        .map_err(|_| Error::InvalidHeader { name: *name })?;
                    let header_value = HeaderValue::from_str(value)
                        .map_err(|_| Error::InvalidHeader { name: *name })?;
                    parts.headers.insert(header_name, header_value);
                }
                Ok(parts)
            }
            RequestOption::Query(pairs) => {
                parts.url.set_query(None);
                if !pairs.is_empty() {
                    let mut encoder = parts.url.query_pairs_mut();
                    for (key, value) in pairs {
                        encoder.append_pair(key, value);
                    }
                }
                Ok(parts)
            }
            RequestOption::JsonContentType => {
                parts
                    .headers
                    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Ok(parts)
            }
        }
    }
}

impl ApiClient {
    /// Creates a client from the given options.
    ///
    /// Exactly one of `region` and `host` must be set; anything else is a
    /// configuration error, reported before any request can be built.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let base_url = match (&options.region, &options.host) {
            (Some(_), Some(_)) => {
                return Err(Error::Config(
                    "host and region cannot be used together".to_string(),
                ));
            }
            (None, None) => {
                return Err(Error::Config(
                    "either host or region must be specified".to_string(),
                ));
            }
            (Some(region), None) => region_base_url(region)?,
            (None, Some(host)) => host_base_url(host)?,
        };

        let user_agent = options
            .user_agent
            .unwrap_or_else(|| format!("aegis-client/{}", env!("CARGO_PKG_VERSION")));

        Ok(Self {
            inner: Arc::new(ClientInner {
                http: reqwest::Client::new(),
                api_key: options.api_key,
                base_url,
                user_agent,
            }),
        })
    }

    /// The resolved base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Builds an outbound request without sending it.
    ///
    /// `path` must not start with `/`; it is resolved against the base URL,
    /// e.g. `"v3.0/iam/accounts"` → `https://api.aegisone.com/v3.0/iam/accounts`.
    /// Every request carries the bearer credential and user agent; `options`
    /// are then applied left-to-right. Building never performs I/O.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        options: &[RequestOption],
    ) -> Result<reqwest::Request> {
        if path.starts_with('/') {
            return Err(Error::InvalidPath(format!(
                "path must be relative to the base URL, got {path:?}"
            )));
        }
        let url = self.inner.base_url.join(path)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.inner.api_key))
                .map_err(|_| Error::InvalidHeader { name: "authorization" })?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.inner.user_agent)
                .map_err(|_| Error::InvalidHeader { name: "user-agent" })?,
        );

        let mut parts = RequestParts { url, headers };
        for option in options {
            parts = option.apply(parts)?;
        }

        let mut request = reqwest::Request::new(method, parts.url);
        *request.headers_mut() = parts.headers;
        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }
        Ok(request)
    }

    /// Sends a previously built request.
    pub async fn execute(&self, request: reqwest::Request) -> Result<Response> {
        tracing::debug!(method = %request.method(), url = %request.url(), "sending API request");
        self.inner.http.execute(request).await.map_err(Error::from)
    }

    /// GET with an optional filter header and encoded query parameters. The
    /// common shape of every list endpoint.
    pub(crate) async fn search_and_filter(
        &self,
        path: &str,
        filter: &str,
        params: &QueryParameters,
    ) -> Result<Response> {
        let request = self.build_request(
            Method::GET,
            path,
            None,
            &[
                RequestOption::Header(FILTER_HEADER, filter.to_string()),
                RequestOption::Query(params.pairs()),
            ],
        )?;
        self.execute(request).await
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Response> {
        let request = self.build_request(Method::GET, path, None, &[])?;
        self.execute(request).await
    }

    pub(crate) async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response> {
        let encoded = serde_json::to_vec(body)?;
        let request = self.build_request(
            Method::POST,
            path,
            Some(encoded),
            &[RequestOption::JsonContentType],
        )?;
        self.execute(request).await
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<Response> {
        let request = self.build_request(Method::POST, path, None, &[])?;
        self.execute(request).await
    }

    pub(crate) async fn patch_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response> {
        let encoded = serde_json::to_vec(body)?;
        let request = self.build_request(
            Method::PATCH,
            path,
            Some(encoded),
            &[RequestOption::JsonContentType],
        )?;
        self.execute(request).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Response> {
        let request = self.build_request(Method::DELETE, path, None, &[])?;
        self.execute(request).await
    }
}

fn region_base_url(region: &str) -> Result<Url> {
    let raw = match region {
        "us" => "https://api.aegisone.com/".to_string(),
        "jp" => "https://api.aegisone.co.jp/".to_string(),
        _ => format!("https://api.{region}.aegisone.com/"),
    };
    Ok(Url::parse(&raw)?)
}

fn host_base_url(host: &str) -> Result<Url> {
    let raw = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{host}/")
    };
    Ok(Url::parse(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for_region(region: &str) -> ApiClient {
        ApiClient::new(ClientOptions {
            api_key: "key".to_string(),
            region: Some(region.to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn region_resolves_to_regional_host() {
        let client = client_for_region("au");
        assert_eq!(client.base_url().as_str(), "https://api.au.aegisone.com/");
    }

    #[test]
    fn us_and_jp_regions_use_fixed_hosts() {
        assert_eq!(
            client_for_region("us").base_url().as_str(),
            "https://api.aegisone.com/"
        );
        assert_eq!(
            client_for_region("jp").base_url().as_str(),
            "https://api.aegisone.co.jp/"
        );
    }

    #[test]
    fn host_override_wraps_bare_host() {
        let client = ApiClient::new(ClientOptions {
            api_key: "key".to_string(),
            host: Some("internal.aegisone.dev".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.base_url().as_str(), "https://internal.aegisone.dev/");
    }

    #[test]
    fn host_override_accepts_full_url() {
        let client = ApiClient::new(ClientOptions {
            api_key: "key".to_string(),
            host: Some("http://127.0.0.1:8080".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.base_url().scheme(), "http");
    }

    #[test]
    fn region_and_host_are_mutually_exclusive() {
        let result = ApiClient::new(ClientOptions {
            api_key: "key".to_string(),
            region: Some("us".to_string()),
            host: Some("internal.aegisone.dev".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn region_or_host_is_required() {
        let result = ApiClient::new(ClientOptions {
            api_key: "key".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn build_request_rejects_absolute_paths() {
        let client = client_for_region("us");
        let result = client.build_request(Method::GET, "/v3.0/iam/accounts", None, &[]);
        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }

    #[test]
    fn build_request_attaches_auth_and_user_agent() {
        let client = client_for_region("us");
        let request = client
            .build_request(Method::GET, "v3.0/iam/accounts", None, &[])
            .unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer key"
        );
        assert_eq!(
            request.headers().get(USER_AGENT).unwrap(),
            &format!("aegis-client/{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn user_agent_override_takes_precedence() {
        let client = ApiClient::new(ClientOptions {
            api_key: "key".to_string(),
            region: Some("us".to_string()),
            user_agent: Some("custom-agent/1.0".to_string()),
            ..Default::default()
        })
        .unwrap();
        let request = client
            .build_request(Method::GET, "v3.0/iam/accounts", None, &[])
            .unwrap();
        assert_eq!(request.headers().get(USER_AGENT).unwrap(), "custom-agent/1.0");
    }

    #[test]
    fn empty_filter_header_is_omitted() {
        let client = client_for_region("us");
        let request = client
            .build_request(
                Method::GET,
                "v3.0/alerts",
                None,
                &[RequestOption::Header(FILTER_HEADER, String::new())],
            )
            .unwrap();
        assert!(request.headers().get(FILTER_HEADER).is_none());
    }

    #[test]
    fn non_empty_filter_header_is_attached() {
        let client = client_for_region("us");
        let request = client
            .build_request(
                Method::GET,
                "v3.0/alerts",
                None,
                &[RequestOption::Header(
                    FILTER_HEADER,
                    "severity eq 'high'".to_string(),
                )],
            )
            .unwrap();
        assert_eq!(
            request.headers().get(FILTER_HEADER).unwrap(),
            "severity eq 'high'"
        );
    }

    #[test]
    fn query_option_replaces_query_string() {
        let client = client_for_region("us");
        let request = client
            .build_request(
                Method::GET,
                "v3.0/alerts?stale=1",
                None,
                &[RequestOption::Query(vec![(
                    "top".to_string(),
                    "50".to_string(),
                )])],
            )
            .unwrap();
        assert_eq!(request.url().query(), Some("top=50"));
    }

    #[test]
    fn empty_query_option_clears_query_string() {
        let client = client_for_region("us");
        let request = client
            .build_request(
                Method::GET,
                "v3.0/alerts",
                None,
                &[RequestOption::Query(Vec::new())],
            )
            .unwrap();
        assert_eq!(request.url().query(), None);
    }
}
