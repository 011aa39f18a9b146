//! Account entity model and DTOs.

use bank_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `accounts` table. Every account belongs to exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    /// Minor currency units.
    pub balance: i64,
    pub currency: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub owner: String,
    pub currency: String,
}

/// One page of an owner's accounts, ordered by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAccounts {
    pub owner: String,
    pub limit: i64,
    pub offset: i64,
}
