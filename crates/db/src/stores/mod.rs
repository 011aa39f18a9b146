//! Trait-object stores handed to the service layer.
//!
//! The repositories are plain `PgPool` functions; these wrappers own a pool
//! and expose the async traits the auth core and the API depend on, so tests
//! can substitute in-memory implementations.

mod account;
mod session;
mod user;

pub use account::{AccountStore, PgAccountStore};
pub use session::PgSessionStore;
pub use user::{PgUserStore, UserStore};
