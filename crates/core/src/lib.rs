//! Shared domain types, errors and input validation for the bank backend.
//!
//! This crate has no internal dependencies so it can be used by the auth
//! core, the repository layer, the worker and both transport surfaces.

pub mod error;
pub mod types;
pub mod validation;
