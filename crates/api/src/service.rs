//! User, session and account operations shared by the HTTP handlers and the
//! gRPC service. Transports only translate requests and responses.

use std::time::Duration;

use bank_auth::password::{hash_password, verify_password};
use bank_auth::{ClientContext, OpenedSession, Principal, RenewedAccess};
use bank_core::error::CoreError;
use bank_core::validation::{
    check_field, ensure_valid, validate_currency_code, validate_email, validate_full_name,
    validate_password, validate_username, FieldViolation,
};
use bank_db::models::account::{Account, CreateAccount, ListAccounts};
use bank_db::models::user::{CreateUser, UpdateUser, User};
use bank_worker::{PayloadSendVerifyEmail, TaskOptions};
use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Delay before the verification email task runs, leaving time for the
/// creating request to finish.
const VERIFY_EMAIL_DELAY: Duration = Duration::from_secs(10);

/// Smallest and largest accepted `page_size` when listing accounts.
pub const ACCOUNT_PAGE_SIZE: (i64, i64) = (5, 10);

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Optional profile changes; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub session: OpenedSession,
}

/// Register a user and schedule the verification email.
pub async fn create_user(state: &AppState, input: NewUser) -> AppResult<User> {
    let mut violations = Vec::new();
    check_field(&mut violations, "username", &input.username, validate_username);
    check_field(&mut violations, "password", &input.password, validate_password);
    check_field(&mut violations, "full_name", &input.full_name, validate_full_name);
    check_field(&mut violations, "email", &input.email, validate_email);
    ensure_valid(&violations)?;

    let hashed_password = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .users
        .create_user(&CreateUser {
            username: input.username,
            hashed_password,
            full_name: input.full_name,
            email: input.email,
        })
        .await?;

    tracing::info!(username = %user.username, "User created");

    // The user row is committed at this point; a failed enqueue is reported
    // but does not fail the registration.
    let payload = PayloadSendVerifyEmail {
        username: user.username.clone(),
    };
    let options = TaskOptions::critical().process_in(VERIFY_EMAIL_DELAY);
    if let Err(e) = state
        .distributor
        .distribute_send_verify_email(&payload, options)
        .await
    {
        tracing::error!(username = %user.username, error = %e, "Failed to enqueue verify email task");
    }

    Ok(user)
}

/// Check credentials and open a session.
pub async fn login_user(
    state: &AppState,
    username: &str,
    password: &str,
    client: ClientContext,
) -> AppResult<LoginOutcome> {
    let mut violations = Vec::new();
    check_field(&mut violations, "username", username, validate_username);
    check_field(&mut violations, "password", password, validate_password);
    ensure_valid(&violations)?;

    let user = state.users.get_user(username).await?;

    let password_valid = verify_password(password, &user.hashed_password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(username = %username, "Login with incorrect password");
        return Err(CoreError::Unauthorized("incorrect password".into()).into());
    }

    let session = state.sessions.open(&user.username, client).await?;

    Ok(LoginOutcome { user, session })
}

/// Exchange a refresh token for a fresh access token.
pub async fn renew_access(state: &AppState, refresh_token: &str) -> AppResult<RenewedAccess> {
    if refresh_token.is_empty() {
        return Err(AppError::BadRequest("refresh_token is required".into()));
    }
    Ok(state.sessions.renew(refresh_token).await?)
}

pub async fn current_user(state: &AppState, principal: &Principal) -> AppResult<User> {
    Ok(state.users.get_user(&principal.subject).await?)
}

/// Apply `changes` to `username`, which must be the authenticated principal.
pub async fn update_user(
    state: &AppState,
    principal: &Principal,
    username: &str,
    changes: UserChanges,
) -> AppResult<User> {
    if principal.subject != username {
        tracing::warn!(
            principal = %principal.subject,
            target = %username,
            "Attempt to update another user"
        );
        return Err(CoreError::Forbidden("cannot update other user's info".into()).into());
    }

    let violations = update_violations(username, &changes);
    ensure_valid(&violations)?;

    let mut update = UpdateUser {
        full_name: changes.full_name,
        email: changes.email,
        ..UpdateUser::default()
    };
    if let Some(password) = changes.password {
        update.hashed_password = Some(
            hash_password(&password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
        );
        update.password_changed_at = Some(Utc::now());
    }

    if update.is_empty() {
        return current_user(state, principal).await;
    }

    let user = state.users.update_user(username, &update).await?;
    tracing::info!(username = %user.username, "User updated");
    Ok(user)
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Open a `currency` account owned by the authenticated principal.
pub async fn create_account(
    state: &AppState,
    principal: &Principal,
    currency: &str,
) -> AppResult<Account> {
    let mut violations = Vec::new();
    check_field(&mut violations, "currency", currency, validate_currency_code);
    ensure_valid(&violations)?;

    let account = state
        .accounts
        .create_account(&CreateAccount {
            owner: principal.subject.clone(),
            currency: currency.to_string(),
        })
        .await?;

    tracing::info!(account_id = account.id, owner = %account.owner, "Account created");
    Ok(account)
}

/// Fetch one account; only its owner may see it.
pub async fn get_account(state: &AppState, principal: &Principal, id: i64) -> AppResult<Account> {
    if id < 1 {
        return Err(CoreError::Validation("id: must be a positive integer".into()).into());
    }

    let account = state.accounts.get_account(id).await?;
    if account.owner != principal.subject {
        tracing::warn!(
            account_id = id,
            principal = %principal.subject,
            "Attempt to read another user's account"
        );
        return Err(CoreError::Unauthorized(
            "account doesn't belong to the authenticated user".into(),
        )
        .into());
    }
    Ok(account)
}

/// One page of the principal's own accounts. Pages start at 1.
pub async fn list_accounts(
    state: &AppState,
    principal: &Principal,
    page_id: i64,
    page_size: i64,
) -> AppResult<Vec<Account>> {
    let params = account_page(&principal.subject, page_id, page_size)?;
    Ok(state.accounts.list_accounts(&params).await?)
}

fn account_page(owner: &str, page_id: i64, page_size: i64) -> Result<ListAccounts, CoreError> {
    let (min, max) = ACCOUNT_PAGE_SIZE;
    let mut violations = Vec::new();
    if page_id < 1 {
        violations.push(FieldViolation::new("page_id", "must be at least 1"));
    }
    if !(min..=max).contains(&page_size) {
        violations.push(FieldViolation::new(
            "page_size",
            format!("must be between {min} and {max}"),
        ));
    }
    ensure_valid(&violations)?;

    let offset = (page_id - 1)
        .checked_mul(page_size)
        .ok_or_else(|| CoreError::Validation("page_id: is too large".into()))?;

    Ok(ListAccounts {
        owner: owner.to_string(),
        limit: page_size,
        offset,
    })
}

fn update_violations(username: &str, changes: &UserChanges) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    check_field(&mut violations, "username", username, validate_username);
    if let Some(full_name) = &changes.full_name {
        check_field(&mut violations, "full_name", full_name, validate_full_name);
    }
    if let Some(email) = &changes.email {
        check_field(&mut violations, "email", email, validate_email);
    }
    if let Some(password) = &changes.password {
        check_field(&mut violations, "password", password, validate_password);
    }
    violations
}
