//! Fixed pages the face app serves.

use protogen_app::{Endpoint, EndpointResponse, Endpoints, HttpMethod};

/// Body of `GET /home`.
pub const HOME_BODY: &str = "This is the homepage.";
/// Body of `GET /hello`.
pub const HELLO_BODY: &str = "Hello!";
/// Body of `GET /hello/website`.
pub const HELLO_WEBSITE_BODY: &str = "Hello, website!";

/// `/home`, `/hello` and `/hello/website`, in that order.
#[must_use]
pub fn page_endpoints() -> Endpoints {
    Endpoints::new()
        .with(Endpoint::new(HttpMethod::Get, "/home", |_| {
            EndpointResponse::html(HOME_BODY)
        }))
        .with(Endpoint::new(HttpMethod::Get, "/hello", |_| {
            EndpointResponse::text(HELLO_BODY)
        }))
        .with(Endpoint::new(HttpMethod::Get, "/hello/website", |_| {
            EndpointResponse::text(HELLO_WEBSITE_BODY)
        }))
}
