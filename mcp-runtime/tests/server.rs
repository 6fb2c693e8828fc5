//! End-to-end tests: JSON-RPC in, HTTP out against a mock API.

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aegis_mcp_runtime::{McpServer, ServerConfig};

async fn server_against(mock: &MockServer, allow_write: bool) -> McpServer {
    McpServer::new(ServerConfig {
        api_key: "test-key".to_string(),
        region: None,
        host: Some(mock.uri()),
        allow_write,
    })
    .unwrap()
}

async fn call_tool(server: &McpServer, name: &str, arguments: Value) -> Value {
    let mut responses = server
        .handle_incoming_message(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }))
        .await;
    assert_eq!(responses.len(), 1);
    responses.remove(0)
}

#[tokio::test]
async fn get_account_returns_api_body_verbatim() {
    let mock = MockServer::start().await;
    let body = r#"{"email":"alice@example.com","role":"Master Administrator"}"#;
    Mock::given(method("GET"))
        .and(path("/v3.0/iam/accounts/alice@example.com"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_against(&mock, false).await;
    let response = call_tool(
        &server,
        "aegis_get_account",
        json!({ "accountId": "alice@example.com" }),
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["isError"], json!(false));
    assert_eq!(result["content"][0]["text"], json!(body));
}

#[tokio::test]
async fn unexpected_status_surfaces_context_and_body() {
    let mock = MockServer::start().await;
    let body = r#"{"error":{"code":"NotFound","message":"The account is not found."}}"#;
    Mock::given(method("GET"))
        .and(path("/v3.0/iam/accounts/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_string(body))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_against(&mock, false).await;
    let response = call_tool(&server, "aegis_get_account", json!({ "accountId": "ghost" })).await;

    let result = &response["result"];
    assert_eq!(result["isError"], json!(true));
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("failed to get account:"));
    assert!(text.contains("The account is not found."));
}

#[tokio::test]
async fn missing_required_argument_never_reaches_the_api() {
    let mock = MockServer::start().await;
    let server = server_against(&mock, false).await;

    let response = call_tool(&server, "aegis_get_account", json!({ "accountId": "" })).await;

    let result = &response["result"];
    assert_eq!(result["isError"], json!(true));
    assert_eq!(
        result["content"][0]["text"],
        json!("missing required parameter: accountId")
    );
    assert!(mock.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_tools_attach_filter_header_and_paging_query() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.0/alerts"))
        .and(header("Aegis-Filter", "severity eq 'high'"))
        .and(query_param("top", "50"))
        .and(query_param("orderBy", "createdDateTime desc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"items":[]}"#))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_against(&mock, false).await;
    let response = call_tool(
        &server,
        "aegis_list_alerts",
        json!({
            "filter": "severity eq 'high'",
            "top": 50,
            "orderBy": "createdDateTime desc"
        }),
    )
    .await;

    assert_eq!(response["result"]["isError"], json!(false));
}

#[tokio::test]
async fn empty_filter_and_zero_paging_send_no_header_or_query() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.0/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"items":[]}"#))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_against(&mock, false).await;
    let response = call_tool(&server, "aegis_list_alerts", json!({})).await;
    assert_eq!(response["result"]["isError"], json!(false));

    let requests = mock.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());
    assert!(requests[0].headers.get("Aegis-Filter").is_none());
}

#[tokio::test]
async fn invalid_timestamp_rejects_before_any_request() {
    let mock = MockServer::start().await;
    let server = server_against(&mock, false).await;

    let response = call_tool(
        &server,
        "aegis_list_alerts",
        json!({ "startDateTime": "last tuesday" }),
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["isError"], json!(true));
    assert_eq!(
        result["content"][0]["text"],
        json!("parameter startDateTime is not a valid RFC 3339 timestamp: last tuesday")
    );
    assert!(mock.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_api_keys_posts_body_and_accepts_multi_status() {
    let mock = MockServer::start().await;
    let body = r#"[{"status":204},{"status":404}]"#;
    Mock::given(method("POST"))
        .and(path("/v3.0/iam/apiKeys/delete"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!([{ "id": "key-1" }, { "id": "key-2" }])))
        .respond_with(ResponseTemplate::new(207).set_body_string(body))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_against(&mock, true).await;
    let response = call_tool(
        &server,
        "aegis_delete_api_keys",
        json!({ "ids": ["key-1", "key-2"] }),
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["isError"], json!(false));
    assert_eq!(result["content"][0]["text"], json!(body));
}

#[tokio::test]
async fn update_scan_settings_patches_only_supplied_fields() {
    let mock = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/beta/cloudPosture/accounts/acct-1/scanSetting"))
        .and(body_json(json!({ "enabled": false })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_against(&mock, true).await;
    let response = call_tool(
        &server,
        "aegis_update_scan_settings",
        json!({ "accountId": "acct-1", "enabled": false }),
    )
    .await;

    assert_eq!(response["result"]["isError"], json!(false));
}

#[tokio::test]
async fn start_account_scan_expects_accepted() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/beta/cloudPosture/accounts/acct-1/scan"))
        .respond_with(ResponseTemplate::new(202).set_body_string(""))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_against(&mock, true).await;
    let response = call_tool(
        &server,
        "aegis_start_account_scan",
        json!({ "accountId": "acct-1" }),
    )
    .await;

    assert_eq!(response["result"]["isError"], json!(false));
}

#[tokio::test]
async fn initialize_then_list_then_call_flow() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.0/credits/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"balance":120}"#))
        .mount(&mock)
        .await;

    let server = server_against(&mock, false).await;

    let init = server
        .handle_incoming_message(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": { "protocolVersion": "2024-11-05", "capabilities": {} }
        }))
        .await;
    assert_eq!(init[0]["result"]["protocolVersion"], json!("2024-11-05"));

    let listed = server
        .handle_incoming_message(json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }))
        .await;
    let tools = listed[0]["result"]["tools"].as_array().unwrap();
    assert!(tools.iter().any(|t| t["name"] == json!("aegis_get_credits_balance")));

    let called = call_tool(&server, "aegis_get_credits_balance", json!({})).await;
    assert_eq!(
        called["result"]["content"][0]["text"],
        json!(r#"{"balance":120}"#)
    );
}
