//! Integration tests for remote GeoIP drivers with Wiremock
//!
//! Drives the ip-api and ipwho.is drivers against mock providers.

use futures::future::join_all;
use geogate::adapters::outbound::{build_client, IpApiDriver, IpWhoisDriver};
use geogate::domain::ports::{GeoDriver, GeoLookup};
use geogate::domain::services::Fallback;
use geogate::domain::GeoError;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ip_api_body() -> serde_json::Value {
    serde_json::json!({
        "status": "success",
        "country": "United States",
        "countryCode": "US",
        "region": "CA",
        "regionName": "California",
        "city": "Mountain View",
        "zip": "94043",
        "lat": 37.4223,
        "lon": -122.085,
        "timezone": "America/Los_Angeles",
        "isp": "Google LLC",
        "query": "8.8.8.8"
    })
}

fn ip_api(server: &MockServer, timeout: Duration) -> IpApiDriver {
    IpApiDriver::new(build_client(timeout).unwrap())
        .with_base_url(&server.uri())
        .with_fallback(Fallback::new("ip-api"))
}

fn ipwhois(server: &MockServer) -> IpWhoisDriver {
    IpWhoisDriver::new(build_client(Duration::from_secs(2)).unwrap())
        .with_base_url(&server.uri())
        .with_fallback(Fallback::new("ip-api"))
}

/// Successful lookup maps every field
#[tokio::test]
async fn test_ip_api_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ip_api_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let driver = ip_api(&mock_server, Duration::from_secs(2));
    let loc = driver.get(Some("8.8.8.8")).await;

    assert_eq!(loc.driver, "ip-api");
    assert_eq!(loc.ip.as_deref(), Some("8.8.8.8"));
    assert!(loc.error.is_none());
    assert_eq!(loc.city.as_deref(), Some("Mountain View"));
    assert_eq!(loc.region.as_deref(), Some("California"));
    assert_eq!(loc.region_code.as_deref(), Some("CA"));
    assert_eq!(loc.postal_code.as_deref(), Some("94043"));
    assert_eq!(loc.timezone.as_deref(), Some("America/Los_Angeles"));
    assert_eq!(loc.latitude, Some(37.4223));
}

/// Provider-reported failure surfaces the provider message
#[tokio::test]
async fn test_ip_api_fail_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/192.168.1.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range",
            "query": "192.168.1.1"
        })))
        .mount(&mock_server)
        .await;

    let driver = ip_api(&mock_server, Duration::from_secs(2));
    let loc = driver.get(Some("192.168.1.1")).await;

    assert_eq!(loc.driver, "ip-api");
    assert_eq!(loc.error.as_deref(), Some("private range"));
    assert!(loc.is_default());
}

/// HTTP errors become a normalized error on a default record
#[tokio::test]
async fn test_ip_api_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&mock_server)
        .await;

    let driver = ip_api(&mock_server, Duration::from_secs(2));
    let loc = driver.get(Some("1.1.1.1")).await;

    assert_eq!(loc.error.as_deref(), Some("http status 429"));
    assert!(loc.is_default());

    let raw = driver.get_raw(Some("1.1.1.1")).await;
    assert_eq!(raw.unwrap_err(), GeoError::Status(429));
}

/// Slow providers are cut off by the client timeout
#[tokio::test]
async fn test_ip_api_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ip_api_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let driver = ip_api(&mock_server, Duration::from_millis(50));
    let loc = driver.get(Some("8.8.8.8")).await;

    assert_eq!(loc.error.as_deref(), Some("connection timed out"));
    assert!(loc.is_default());
}

/// Unreachable provider: error text carries no URL
#[tokio::test]
async fn test_unreachable_provider() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let driver = IpApiDriver::new(build_client(Duration::from_secs(2)).unwrap())
        .with_base_url(&format!("http://{}", addr));
    let loc = driver.get(Some("8.8.8.8")).await;

    assert_eq!(loc.error.as_deref(), Some("connection failed"));
    assert!(!loc.error.unwrap().contains("127.0.0.1"));
}

/// Malformed and empty input never reaches the provider
#[tokio::test]
async fn test_invalid_input_skips_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ip_api_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let driver = ip_api(&mock_server, Duration::from_secs(2));

    for input in [None, Some(""), Some("   "), Some("999.1.1.1"), Some("localhost")] {
        let loc = driver.get(input).await;
        assert_eq!(loc.ip.as_deref(), input);
        assert!(loc.error.is_none());
        assert!(loc.is_default());
    }
}

/// get(None) yields the same default shape for every remote driver
#[tokio::test]
async fn test_get_none_uniform_across_drivers() {
    let drivers: Vec<Arc<dyn GeoLookup>> = vec![
        Arc::new(IpApiDriver::default().with_fallback(Fallback::new("ipwhois"))),
        Arc::new(IpWhoisDriver::default().with_fallback(Fallback::new("ipwhois"))),
    ];

    for driver in drivers {
        let loc = driver.lookup(None).await;
        assert_eq!(loc.driver, "ipwhois", "driver {}", driver.driver_name());
        assert!(loc.ip.is_none());
        assert!(loc.error.is_none());
        assert!(loc.is_default());
    }
}

/// Repeated lookups against a deterministic provider are identical
#[tokio::test]
async fn test_repeated_lookups_are_identical() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ip_api_body()))
        .expect(8)
        .mount(&mock_server)
        .await;

    let driver = ip_api(&mock_server, Duration::from_secs(2));

    let first = driver.get(Some("8.8.8.8")).await;
    let second = driver.get(Some("8.8.8.8")).await;
    assert_eq!(first, second);

    let concurrent = join_all((0..6).map(|_| driver.get(Some("8.8.8.8")))).await;
    assert!(concurrent.iter().all(|loc| *loc == first));
}

/// get is locate applied to get_raw
#[tokio::test]
async fn test_get_equals_locate_of_raw() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ip_api_body()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/8.8.4.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "8.8.4.4",
            "success": true,
            "country": "United States",
            "country_code": "US",
            "city": "Mountain View",
            "latitude": 37.3860517,
            "longitude": -122.0838511,
            "timezone": { "id": "America/Los_Angeles" }
        })))
        .mount(&mock_server)
        .await;

    let driver = ip_api(&mock_server, Duration::from_secs(2));
    let raw = driver.get_raw(Some("8.8.8.8")).await.unwrap();
    assert_eq!(driver.locate("8.8.8.8", raw), driver.get(Some("8.8.8.8")).await);

    let driver = ipwhois(&mock_server);
    let raw = driver.get_raw(Some("8.8.4.4")).await.unwrap();
    assert_eq!(driver.locate("8.8.4.4", raw), driver.get(Some("8.8.4.4")).await);
}

/// Raw JSON keeps provider fields the driver does not map
#[tokio::test]
async fn test_lookup_raw_keeps_provider_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ip_api_body()))
        .mount(&mock_server)
        .await;

    let driver: Arc<dyn GeoLookup> = Arc::new(ip_api(&mock_server, Duration::from_secs(2)));
    let raw = driver.lookup_raw(Some("8.8.8.8")).await.unwrap();

    assert_eq!(raw["isp"], "Google LLC");
    assert_eq!(raw["countryCode"], "US");
}

/// ipwho.is failure payload
#[tokio::test]
async fn test_ipwhois_failure_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/10.0.0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "10.0.0.1",
            "success": false,
            "message": "Reserved range"
        })))
        .mount(&mock_server)
        .await;

    let loc = ipwhois(&mock_server).get(Some("10.0.0.1")).await;

    assert_eq!(loc.driver, "ip-api");
    assert_eq!(loc.error.as_deref(), Some("Reserved range"));
    assert!(loc.is_default());
}

/// ipwho.is malformed body
#[tokio::test]
async fn test_ipwhois_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let loc = ipwhois(&mock_server).get(Some("1.1.1.1")).await;
    assert_eq!(loc.error.as_deref(), Some("malformed provider response"));
}
