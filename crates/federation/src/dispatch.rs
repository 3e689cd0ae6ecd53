//! The Cluster Federation Router's dispatch helper (spec §4.4): a single
//! node-lookup-parameterised function that either hands an operation to the
//! local slot or forwards it upstream with a bearer token and a 12s
//! timeout, grounded on the `axum` + `reqwest` pairing
//! `other_examples/fourthplaces-rootsignal`'s scout/supervisor modules use
//! for their own internal control plane.

use crate::auth::outbound_token;
use crate::error::FederationError;
use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use gk_core::Node;
use serde_json::Value;
use std::time::Duration;

/// How long the router waits for an upstream hop before giving up (spec
/// §4.4 "set a 12s timeout").
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(12);

/// Whether a per-slot operation should run in-process or be forwarded.
#[derive(Debug)]
pub enum DispatchTarget<'a> {
    Local,
    Remote(&'a Node),
}

/// A non-streaming upstream response, proxied verbatim (spec §4.4
/// "Upstream HTTP errors are surfaced with the upstream status code and
/// body").
#[derive(Debug)]
pub struct ForwardedResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub struct Dispatcher {
    local_node_id: String,
    nodes: Vec<Node>,
    http: reqwest::Client,
    auth_secret: String,
}

impl Dispatcher {
    pub fn new(local_node_id: impl Into<String>, nodes: Vec<Node>, auth_secret: impl Into<String>) -> Self {
        Self {
            local_node_id: local_node_id.into(),
            nodes,
            http: reqwest::Client::new(),
            auth_secret: auth_secret.into(),
        }
    }

    /// Resolves `node_id` to a dispatch target. Recognises `Node::LOCAL_ALIASES`
    /// and the configured local node id as "this node" (spec §4.4).
    pub fn resolve(&self, node_id: &str) -> Result<DispatchTarget<'_>, FederationError> {
        if Node::LOCAL_ALIASES.contains(&node_id) || node_id == self.local_node_id {
            return Ok(DispatchTarget::Local);
        }
        let node = self
            .nodes
            .iter()
            .find(|n| n.node_id.as_str() == node_id)
            .ok_or_else(|| FederationError::UnknownNode(node_id.to_string()))?;
        if node.is_local() {
            return Err(FederationError::NodeNotRemote(node_id.to_string()));
        }
        Ok(DispatchTarget::Remote(node))
    }

    /// Forwards a JSON control-plane request to `node`'s `<base_url><path>`,
    /// attaching a bearer token (the node's configured token, falling back
    /// to a locally minted admin token). Upstream non-2xx responses are
    /// returned as `Ok` with the upstream status/body; only transport
    /// failures produce `Err(BadGateway)`.
    pub async fn forward_json(
        &self,
        node: &Node,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ForwardedResponse, FederationError> {
        let token = outbound_token(&node.shared_token, &self.auth_secret)?;
        let url = format!("{}{}", node.base_url.trim_end_matches('/'), path);

        let mut request = self
            .http
            .request(method, &url)
            .timeout(UPSTREAM_TIMEOUT)
            .bearer_auth(token);
        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FederationError::BadGateway(e.to_string()))?;

        let status = StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        let body = response
            .json::<Value>()
            .await
            .unwrap_or(Value::Null);

        Ok(ForwardedResponse { status, body })
    }

    /// Proxies a download as a streaming response, preserving the upstream
    /// `Content-Type` and synthesizing a `Content-Disposition` header (spec
    /// §4.4 "downloads are proxied as a streaming response").
    pub async fn forward_download(
        &self,
        node: &Node,
        path: &str,
        filename: &str,
    ) -> Result<Response, FederationError> {
        let token = outbound_token(&node.shared_token, &self.auth_secret)?;
        let url = format!("{}{}", node.base_url.trim_end_matches('/'), path);

        let response = self
            .http
            .get(&url)
            .timeout(UPSTREAM_TIMEOUT)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| FederationError::BadGateway(e.to_string()))?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| header::HeaderValue::from_static("application/octet-stream"));
        let status = StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);

        let body = Body::from_stream(response.bytes_stream());
        let resp = Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\""))
            .body(body)
            .map_err(|e| FederationError::BadGateway(e.to_string()))?;

        Ok(resp)
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
