//! The background web host serving real HTTP.

use std::time::Duration;

use protogen_app::{
    Endpoint, EndpointResponse, Endpoints, HttpMethod, WebHost, WebHostConfig, WebHostStatus,
    attribute_endpoints,
};
use protogen_core::{AccessLevel, AttributeStore};

const BIND_TIMEOUT: Duration = Duration::from_secs(5);

fn url(port: u16, path: &str) -> String {
    format!("http://127.0.0.1:{port}{path}")
}

fn client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn greeting_endpoints() -> Endpoints {
    Endpoints::new()
        .with(Endpoint::new(HttpMethod::Get, "/hello", |_| EndpointResponse::text("Hello!")))
        .with(Endpoint::new(HttpMethod::Post, "/hello", |req| {
            EndpointResponse::text(format!("Hello, {}!", req.body))
        }))
        .with(Endpoint::new(HttpMethod::Get, "/echo/:word", |req| {
            EndpointResponse::text(req.param("word").unwrap_or_default().to_owned())
        }))
}

#[test]
fn serves_endpoints_until_stopped() {
    protogen_test::init_test_logging();
    let mut host = WebHost::spawn(WebHostConfig::loopback(), greeting_endpoints().into_router()).unwrap();
    let port = host.wait_until_bound(BIND_TIMEOUT).expect("web host never bound");
    assert_eq!(host.port(), Some(port));
    assert_eq!(host.status(), WebHostStatus::Listening { port });

    let http = client();
    let hello = http.get(url(port, "/hello")).send().unwrap();
    assert_eq!(hello.status(), 200);
    assert_eq!(hello.text().unwrap(), "Hello!");

    let posted = http.post(url(port, "/hello")).body("visor").send().unwrap();
    assert_eq!(posted.text().unwrap(), "Hello, visor!");

    let echoed = http.get(url(port, "/echo/beep")).send().unwrap();
    assert_eq!(echoed.text().unwrap(), "beep");

    let missing = http.get(url(port, "/nope")).send().unwrap();
    assert_eq!(missing.status(), 404);

    host.stop();
    assert_eq!(host.status(), WebHostStatus::Stopped);
    assert_eq!(host.port(), None);
    assert!(client().get(url(port, "/hello")).send().is_err());

    // Idempotent.
    host.stop();
    assert_eq!(host.status(), WebHostStatus::Stopped);
}

#[test]
fn serves_attribute_store() {
    let store = AttributeStore::new();
    store.admin_set("name", "Protogen Face", AccessLevel::Read);
    store.admin_set("brightness", "50", AccessLevel::ReadWrite);

    let host = WebHost::spawn(WebHostConfig::loopback(), attribute_endpoints(&store).into_router()).unwrap();
    let port = host.wait_until_bound(BIND_TIMEOUT).unwrap();
    let http = client();

    let listing: std::collections::HashMap<String, String> =
        http.get(url(port, "/attributes")).send().unwrap().json().unwrap();
    assert_eq!(listing["name"], "Protogen Face");

    let put = http.put(url(port, "/attributes/brightness")).body("90").send().unwrap();
    assert_eq!(put.status(), 204);
    assert_eq!(store.get("brightness").unwrap(), "90");

    let denied = http.put(url(port, "/attributes/name")).body("x").send().unwrap();
    assert_eq!(denied.status(), 403);

    let missing = http.get(url(port, "/attributes/ghost")).send().unwrap();
    assert_eq!(missing.status(), 404);
}

#[test]
fn occupied_port_reports_failure() {
    let blocker = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let taken = blocker.local_addr().unwrap().port();

    let config = WebHostConfig {
        port: taken,
        ..WebHostConfig::loopback()
    };
    let mut host = WebHost::spawn(config, greeting_endpoints().into_router()).unwrap();

    assert_eq!(host.wait_until_bound(BIND_TIMEOUT), None);
    assert!(matches!(host.status(), WebHostStatus::Failed(_)));
    assert_eq!(host.port(), None);

    host.stop();
    assert!(matches!(host.status(), WebHostStatus::Failed(_)));
}

#[test]
fn drop_joins_the_worker() {
    let host = WebHost::spawn(WebHostConfig::loopback(), greeting_endpoints().into_router()).unwrap();
    let port = host.wait_until_bound(BIND_TIMEOUT).unwrap();
    drop(host);
    assert!(client().get(url(port, "/hello")).send().is_err());
}
