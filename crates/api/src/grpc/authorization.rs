//! Bearer authentication from gRPC request metadata.

use bank_auth::guard::AUTHORIZATION_KEY;
use bank_auth::{AuthError, BearerGuard, CredentialSource, Principal};
use tonic::metadata::MetadataMap;
use tonic::{Request, Status};

use crate::error::UNAUTHORIZED_MESSAGE;

/// Request metadata as a credential source. Only the first `authorization`
/// value is considered.
pub struct MetadataCredentials<'a>(pub &'a MetadataMap);

impl CredentialSource for MetadataCredentials<'_> {
    fn authorization(&self) -> Result<Option<&str>, AuthError> {
        match self.0.get(AUTHORIZATION_KEY) {
            None => Ok(None),
            Some(value) => value
                .to_str()
                .map(Some)
                .map_err(|_| AuthError::MalformedHeader),
        }
    }
}

/// Verify the caller's access token before the RPC body runs.
#[allow(clippy::result_large_err)]
pub fn authorize_user<T>(guard: &BearerGuard, request: &Request<T>) -> Result<Principal, Status> {
    guard
        .authorize(&MetadataCredentials(request.metadata()))
        .map_err(|e| {
            tracing::debug!(reason = e.error_code(), "Rejected metadata credential");
            if e.is_verification_failure() {
                Status::unauthenticated(UNAUTHORIZED_MESSAGE)
            } else {
                Status::unauthenticated(e.to_string())
            }
        })
}
