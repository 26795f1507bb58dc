//! Endpoints serving an app's attribute store.

use protogen_core::{AttributeError, AttributeStore};
use tracing::debug;

use crate::endpoint::{Endpoint, EndpointRequest, EndpointResponse, Endpoints, HttpMethod};

/// `GET /attributes`, `GET /attributes/:id` and `PUT /attributes/:id`.
///
/// Reads and writes go through the access-checked store interface: unreadable
/// or unwritable attributes answer 403, unknown ones 404.
#[must_use]
pub fn attribute_endpoints(store: &AttributeStore) -> Endpoints {
    let list = store.clone();
    let read = store.clone();
    let write = store.clone();

    Endpoints::new()
        .with(Endpoint::new(HttpMethod::Get, "/attributes", move |_| {
            match serde_json::to_string(&list.readable()) {
                Ok(body) => EndpointResponse::json(body),
                Err(e) => EndpointResponse::error(500, e.to_string()),
            }
        }))
        .with(Endpoint::new(HttpMethod::Get, "/attributes/:id", move |req| {
            with_id(req, |id| read.get(id).map(EndpointResponse::text))
        }))
        .with(Endpoint::new(HttpMethod::Put, "/attributes/:id", move |req| {
            with_id(req, |id| {
                write.set(id, req.body.clone())?;
                debug!(id = %id, "Attribute written over HTTP");
                Ok(EndpointResponse::status(204))
            })
        }))
}

fn with_id(
    req: &EndpointRequest,
    op: impl FnOnce(&str) -> Result<EndpointResponse, AttributeError>,
) -> EndpointResponse {
    let Some(id) = req.param("id") else {
        return EndpointResponse::error(400, "missing attribute id");
    };
    op(id).unwrap_or_else(|e| error_response(&e))
}

fn error_response(error: &AttributeError) -> EndpointResponse {
    match error {
        AttributeError::NotFound { .. } => EndpointResponse::error(404, error.to_string()),
        AttributeError::PermissionDenied { .. } => EndpointResponse::error(403, error.to_string()),
    }
}
