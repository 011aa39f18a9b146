//! Bank API server library.
//!
//! Exposes config, state, error handling, the HTTP routes and the gRPC
//! service so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod grpc;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod service;
pub mod state;
