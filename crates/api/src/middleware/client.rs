//! Client context capture for session records.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use bank_auth::ClientContext;

/// Proxy header carrying the originating client address.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Best-effort [`ClientContext`] for the current request. Never rejects.
#[derive(Debug, Clone)]
pub struct ClientInfo(pub ClientContext);

impl<S: Send + Sync> FromRequestParts<S> for ClientInfo {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(ClientInfo(client_context(&parts.headers, peer)))
    }
}

/// The first hop of `X-Forwarded-For` is preferred over the socket peer.
pub fn client_context(headers: &HeaderMap, peer: Option<SocketAddr>) -> ClientContext {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let forwarded = header(X_FORWARDED_FOR).and_then(|value| {
        value
            .split(',')
            .next()
            .map(|ip| ip.trim().to_string())
            .filter(|ip| !ip.is_empty())
    });

    ClientContext {
        user_agent: header(USER_AGENT.as_str()),
        client_ip: forwarded.or_else(|| peer.map(|addr| addr.ip().to_string())),
    }
}
