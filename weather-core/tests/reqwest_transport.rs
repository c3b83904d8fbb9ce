//! End-to-end tests for WeatherClient over the reqwest transport, using wiremock.

use std::time::Duration;

use amap_weather_core::{TransportOptions, WeatherClient, WeatherPayload};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, key: &str) -> WeatherClient {
    let mut client = WeatherClient::new(key);
    client.set_transport_options(TransportOptions::default().with_base_url(server.uri()));
    client
}

#[tokio::test]
async fn test_weather_json_roundtrip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/weather/weatherInfo"))
        .and(query_param("key", "mock-key"))
        .and(query_param("city", "苏州"))
        .and(query_param("output", "json"))
        .and(query_param("extensions", "base"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "1",
            "infocode": "10000",
            "lives": [{ "city": "苏州市", "weather": "晴", "temperature": "21" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = client_for(&mock_server, "mock-key")
        .fetch_weather("苏州", "base", "json")
        .await
        .unwrap();

    let map = payload.as_json().unwrap();
    assert_eq!(map["lives"][0]["weather"], "晴");
}

#[tokio::test]
async fn test_weather_xml_is_returned_verbatim() {
    let mock_server = MockServer::start().await;
    let body = "<response><status>1</status><lives/></response>";

    Mock::given(method("GET"))
        .and(path("/v3/weather/weatherInfo"))
        .and(query_param("output", "xml"))
        .and(query_param("extensions", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let payload = client_for(&mock_server, "mock-key")
        .fetch_weather("苏州", "all", "xml")
        .await
        .unwrap();

    assert_eq!(payload, WeatherPayload::Xml(body.to_string()));
}

#[tokio::test]
async fn test_live_weather_from_ip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/ip"))
        .and(query_param("ip", "114.247.50.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "1",
            "infocode": "10000",
            "province": "北京市",
            "city": "北京市"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/weather/weatherInfo"))
        .and(query_param("city", "北京市"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "1",
            "infocode": "10000",
            "lives": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = client_for(&mock_server, "mock-key")
        .resolve_and_fetch("ip", "114.247.50.2", "base", "json")
        .await
        .unwrap();

    assert!(payload.as_json().is_some());
}

#[tokio::test]
async fn test_upstream_error_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/geocode/regeo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "0",
            "info": "USERKEY_PLAT_NOMATCH",
            "infocode": "10009"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server, "mock-key")
        .fetch_city_by_geo("120.585294,31.299758")
        .await
        .unwrap_err();

    assert!(err.is_http());
    assert_eq!(err.to_string(), "USERKEY_PLAT_NOMATCH 请求key与绑定平台不符");
    assert_eq!(err.code(), Some(10009));
}

#[tokio::test]
async fn test_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/ip"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server, "mock-key")
        .fetch_city_by_ip("8.8.8.8")
        .await
        .unwrap_err();

    assert!(err.is_http());
    assert_eq!(err.code(), Some(503));
    assert!(err.to_string().contains("upstream unavailable"));
}

#[tokio::test]
async fn test_timeout_from_transport_options() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/ip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"status":"1"}"#)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let mut client = WeatherClient::new("mock-key");
    client.set_transport_options(
        TransportOptions::default()
            .with_base_url(mock_server.uri())
            .with_timeout(Duration::from_millis(100)),
    );

    let err = client.fetch_city_by_ip("8.8.8.8").await.unwrap_err();

    assert!(err.is_http());
    assert_eq!(err.code(), None);
}

#[tokio::test]
async fn test_empty_key_is_not_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/ip"))
        .and(query_param_is_missing("key"))
        .and(header("user-agent", "probe/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":1}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = WeatherClient::new("");
    client.set_transport_options(
        TransportOptions::default()
            .with_base_url(mock_server.uri())
            .with_user_agent("probe/1.0"),
    );

    client.fetch_city_by_ip("8.8.8.8").await.unwrap();
}
