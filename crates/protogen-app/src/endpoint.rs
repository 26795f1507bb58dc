//! Framework-neutral HTTP endpoints an app contributes to a server.
//!
//! Handlers see an [`EndpointRequest`] and return an [`EndpointResponse`]; they
//! never touch the server framework directly. [`Endpoints::into_router`]
//! mounts a list on an `axum` router, which is how both the self-hosted server
//! and axum-based hosts serve them.
//!
//! Paths use `:name` segments for parameters, e.g. `/attributes/:id`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodFilter, MethodRouter};
use tracing::warn;

/// HTTP methods an endpoint may answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// DELETE.
    Delete,
    /// PATCH.
    Patch,
}

impl HttpMethod {
    fn filter(self) -> MethodFilter {
        match self {
            Self::Get => MethodFilter::GET,
            Self::Post => MethodFilter::POST,
            Self::Put => MethodFilter::PUT,
            Self::Delete => MethodFilter::DELETE,
            Self::Patch => MethodFilter::PATCH,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        };
        f.write_str(name)
    }
}

/// What a handler gets to see of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointRequest {
    /// Values of the path's `:name` segments.
    pub params: HashMap<String, String>,
    /// Request body, lossily decoded as UTF-8.
    pub body: String,
}

impl EndpointRequest {
    /// A path parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// A handler's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Response body.
    pub body: String,
}

impl EndpointResponse {
    /// 200 with a `text/plain` body.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self::with_type(200, "text/plain; charset=utf-8", body)
    }

    /// 200 with a `text/html` body.
    #[must_use]
    pub fn html(body: impl Into<String>) -> Self {
        Self::with_type(200, "text/html; charset=utf-8", body)
    }

    /// 200 with an `application/json` body.
    #[must_use]
    pub fn json(body: impl Into<String>) -> Self {
        Self::with_type(200, "application/json", body)
    }

    /// An empty response with the given status.
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
        }
    }

    /// A plain-text response with the given status.
    #[must_use]
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self::with_type(status, "text/plain; charset=utf-8", message)
    }

    fn with_type(status: u16, content_type: &str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some(content_type.to_owned()),
            body: body.into(),
        }
    }
}

impl IntoResponse for EndpointResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self.content_type {
            Some(content_type) => {
                (status, [(header::CONTENT_TYPE, content_type)], self.body).into_response()
            },
            None => (status, self.body).into_response(),
        }
    }
}

/// Shared handler function.
pub type EndpointHandler = Arc<dyn Fn(&EndpointRequest) -> EndpointResponse + Send + Sync>;

/// One route an app serves.
#[derive(Clone)]
pub struct Endpoint {
    /// Method the route answers.
    pub method: HttpMethod,
    /// Route path, with `:name` parameter segments.
    pub path: String,
    /// Request handler.
    pub handler: EndpointHandler,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Endpoint {
    /// Create an endpoint from a handler closure.
    pub fn new<F>(method: HttpMethod, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&EndpointRequest) -> EndpointResponse + Send + Sync + 'static,
    {
        Self {
            method,
            path: path.into(),
            handler: Arc::new(handler),
        }
    }

    /// Invoke the handler directly.
    #[must_use]
    pub fn call(&self, request: &EndpointRequest) -> EndpointResponse {
        (self.handler)(request)
    }
}

/// Ordered list of endpoints.
#[derive(Debug, Clone, Default)]
pub struct Endpoints {
    entries: Vec<Endpoint>,
}

impl Endpoints {
    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an endpoint.
    pub fn push(&mut self, endpoint: Endpoint) {
        self.entries.push(endpoint);
    }

    /// Append an endpoint, builder style.
    #[must_use]
    pub fn with(mut self, endpoint: Endpoint) -> Self {
        self.push(endpoint);
        self
    }

    /// Append another list, keeping order.
    pub fn extend(&mut self, other: Endpoints) {
        self.entries.extend(other.entries);
    }

    /// Endpoints in declaration order.
    #[must_use]
    pub fn as_slice(&self) -> &[Endpoint] {
        &self.entries
    }

    /// Number of endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the endpoint for an exact method and path.
    #[must_use]
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<&Endpoint> {
        self.entries
            .iter()
            .find(|e| e.method == method && e.path == path)
    }

    /// Mount every endpoint on a new router.
    ///
    /// Endpoints sharing a path are merged into one route. When the same
    /// method and path appear twice, the first declaration wins.
    #[must_use]
    pub fn into_router(self) -> Router {
        let mut groups: Vec<(String, Vec<Endpoint>)> = Vec::new();
        for endpoint in self.entries {
            match groups.iter_mut().find(|(path, _)| *path == endpoint.path) {
                Some((_, group)) => group.push(endpoint),
                None => groups.push((endpoint.path.clone(), vec![endpoint])),
            }
        }

        groups
            .into_iter()
            .fold(Router::new(), |router, (path, group)| {
                router.route(&path, method_router(group))
            })
    }
}

fn method_router(group: Vec<Endpoint>) -> MethodRouter {
    let mut seen: Vec<HttpMethod> = Vec::new();
    let mut route = MethodRouter::new();
    for endpoint in group {
        if seen.contains(&endpoint.method) {
            warn!(
                method = %endpoint.method,
                path = %endpoint.path,
                "Duplicate endpoint ignored"
            );
            continue;
        }
        seen.push(endpoint.method);
        route = route.on(endpoint.method.filter(), adapt(endpoint.handler));
    }
    route
}

impl IntoIterator for Endpoints {
    type Item = Endpoint;
    type IntoIter = std::vec::IntoIter<Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Wrap a neutral handler as an axum handler.
fn adapt(
    handler: EndpointHandler,
) -> impl Fn(Option<Path<HashMap<String, String>>>, Bytes) -> std::future::Ready<EndpointResponse>
+ Clone
+ Send
+ Sync
+ 'static {
    move |params: Option<Path<HashMap<String, String>>>, body: Bytes| {
        let request = EndpointRequest {
            params: params.map(|Path(p)| p).unwrap_or_default(),
            body: String::from_utf8_lossy(&body).into_owned(),
        };
        std::future::ready(handler(&request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> Endpoint {
        Endpoint::new(HttpMethod::Get, "/hello", |_| EndpointResponse::text("Hello!"))
    }

    #[test]
    fn test_endpoints_keep_declaration_order() {
        let endpoints = Endpoints::new()
            .with(Endpoint::new(HttpMethod::Get, "/home", |_| EndpointResponse::html("home")))
            .with(hello());
        let paths: Vec<&str> = endpoints.as_slice().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["/home", "/hello"]);
    }

    #[test]
    fn test_call_handler_directly() {
        let endpoints = Endpoints::new().with(hello());
        let response = endpoints
            .find(HttpMethod::Get, "/hello")
            .unwrap()
            .call(&EndpointRequest::default());
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "Hello!");
        assert!(endpoints.find(HttpMethod::Post, "/hello").is_none());
    }

    #[test]
    fn test_request_param() {
        let request = EndpointRequest {
            params: HashMap::from([("id".to_owned(), "name".to_owned())]),
            body: String::new(),
        };
        assert_eq!(request.param("id"), Some("name"));
        assert_eq!(request.param("other"), None);
    }

    #[test]
    fn test_into_response_status_and_type() {
        let response = EndpointResponse::html("<p>x</p>").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );

        let response = EndpointResponse::status(204).into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_debug_omits_handler() {
        let debug = format!("{:?}", hello());
        assert!(debug.contains("/hello"));
    }
}
