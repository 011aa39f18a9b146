//! Client context from gRPC metadata and the transport peer.

use bank_auth::ClientContext;
use tonic::Request;

/// User agent forwarded by an HTTP-to-gRPC gateway.
const GRPC_GATEWAY_USER_AGENT: &str = "grpcgateway-user-agent";
const USER_AGENT: &str = "user-agent";
const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Best-effort capture for the session record.
///
/// A direct `user-agent` overrides the gateway-forwarded one, and the
/// transport peer overrides `x-forwarded-for`.
pub fn extract_client_context<T>(request: &Request<T>) -> ClientContext {
    let md = request.metadata();
    let value = |key: &str| {
        md.get(key)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let user_agent = value(USER_AGENT).or_else(|| value(GRPC_GATEWAY_USER_AGENT));
    let client_ip = request
        .remote_addr()
        .map(|addr| addr.ip().to_string())
        .or_else(|| value(X_FORWARDED_FOR));

    ClientContext {
        user_agent,
        client_ip,
    }
}
