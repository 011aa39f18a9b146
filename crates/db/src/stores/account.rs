use async_trait::async_trait;

use crate::models::account::{Account, CreateAccount, ListAccounts};
use crate::repositories::AccountRepo;
use crate::{DbError, DbPool};

/// Account persistence. Ownership checks belong to the caller.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// A second account in the same currency for one owner is
    /// [`DbError::AlreadyExists`].
    async fn create_account(&self, input: &CreateAccount) -> Result<Account, DbError>;

    async fn get_account(&self, id: i64) -> Result<Account, DbError>;

    async fn list_accounts(&self, params: &ListAccounts) -> Result<Vec<Account>, DbError>;
}

#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: DbPool,
}

impl PgAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create_account(&self, input: &CreateAccount) -> Result<Account, DbError> {
        AccountRepo::create(&self.pool, input).await.map_err(|e| {
            DbError::from_write(e, &format!("{} account for {}", input.currency, input.owner))
        })
    }

    async fn get_account(&self, id: i64) -> Result<Account, DbError> {
        AccountRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| DbError::NotFound {
                entity: "account",
                key: id.to_string(),
            })
    }

    async fn list_accounts(&self, params: &ListAccounts) -> Result<Vec<Account>, DbError> {
        Ok(AccountRepo::list_by_owner(&self.pool, params).await?)
    }
}
