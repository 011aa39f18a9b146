//! Credential and session authority.
//!
//! - [`token`] -- credential payloads and the [`token::TokenMaker`] schemes.
//! - [`authority`] -- access/refresh issuance over one token maker.
//! - [`refresh`] -- session opening and the access-token renewal protocol.
//! - [`guard`] -- bearer credential extraction shared by every transport.
//! - [`session`] -- the persisted session record and its store contract.
//! - [`password`] -- Argon2id password hashing and verification.

pub mod authority;
pub mod config;
pub mod error;
pub mod guard;
pub mod password;
pub mod refresh;
pub mod session;
pub mod token;

pub use authority::CredentialAuthority;
pub use config::TokenConfig;
pub use error::AuthError;
pub use guard::{BearerGuard, CredentialSource, Principal};
pub use refresh::{OpenedSession, RenewedAccess, SessionRefreshProtocol};
pub use session::{ClientContext, Session, SessionStore, StoreError};
pub use token::{Payload, TokenMaker};
