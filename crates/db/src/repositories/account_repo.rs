//! Repository for the `accounts` table.

use sqlx::PgPool;

use crate::models::account::{Account, CreateAccount, ListAccounts};

const COLUMNS: &str = "id, owner, balance, currency, created_at";

pub struct AccountRepo;

impl AccountRepo {
    /// Open a zero-balance account.
    pub async fn create(pool: &PgPool, input: &CreateAccount) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (owner, currency)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(&input.owner)
            .bind(&input.currency)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_owner(
        pool: &PgPool,
        params: &ListAccounts,
    ) -> Result<Vec<Account>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM accounts
             WHERE owner = $1
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(&params.owner)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await
    }
}
