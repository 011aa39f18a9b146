//! gRPC types and service stubs generated from `proto/bank/v1`.
//!
//! ```ignore
//! use bank_proto::bank_client::BankClient;
//! use bank_proto::RenewAccessTokenRequest;
//!
//! let mut client = BankClient::connect("http://localhost:9090").await?;
//! let response = client
//!     .renew_access_token(RenewAccessTokenRequest { refresh_token })
//!     .await?;
//! ```

#![allow(clippy::derive_partial_eq_without_eq)]

pub mod bank {
    pub mod v1 {
        tonic::include_proto!("bank.v1");
    }
}

pub use bank::v1::*;
