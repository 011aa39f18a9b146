//! gRPC `bank.v1.Bank` service.
//!
//! Mirrors the HTTP surface over the same [`service`](crate::service)
//! operations. `UpdateUser` authenticates from request metadata; the other
//! RPCs are public.

pub mod authorization;
pub mod metadata;
mod status;

use bank_core::types::Timestamp;
use bank_db::models::user::User;
use bank_proto::bank_server::{Bank, BankServer};
use bank_proto::{
    CreateUserRequest, CreateUserResponse, LoginUserRequest, LoginUserResponse,
    RenewAccessTokenRequest, RenewAccessTokenResponse, UpdateUserRequest, UpdateUserResponse,
};
use tonic::{Request, Response, Status};

use crate::service::{self, NewUser, UserChanges};
use crate::state::AppState;
use authorization::authorize_user;
use metadata::extract_client_context;

pub struct BankService {
    state: AppState,
}

impl BankService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn into_server(self) -> BankServer<Self> {
        BankServer::new(self)
    }
}

fn timestamp(ts: Timestamp) -> Option<prost_types::Timestamp> {
    Some(prost_types::Timestamp {
        seconds: ts.timestamp(),
        nanos: ts.timestamp_subsec_nanos() as i32,
    })
}

fn convert_user(user: User) -> bank_proto::User {
    bank_proto::User {
        username: user.username,
        full_name: user.full_name,
        email: user.email,
        password_changed_at: timestamp(user.password_changed_at),
        created_at: timestamp(user.created_at),
    }
}

#[tonic::async_trait]
impl Bank for BankService {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let req = request.into_inner();
        let user = service::create_user(
            &self.state,
            NewUser {
                username: req.username,
                full_name: req.full_name,
                email: req.email,
                password: req.password,
            },
        )
        .await?;

        Ok(Response::new(CreateUserResponse {
            user: Some(convert_user(user)),
        }))
    }

    async fn login_user(
        &self,
        request: Request<LoginUserRequest>,
    ) -> Result<Response<LoginUserResponse>, Status> {
        let client = extract_client_context(&request);
        let req = request.into_inner();

        let outcome =
            service::login_user(&self.state, &req.username, &req.password, client).await?;
        let session = outcome.session;

        Ok(Response::new(LoginUserResponse {
            user: Some(convert_user(outcome.user)),
            session_id: session.session_id.to_string(),
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            access_token_expires_at: timestamp(session.access_payload.expires_at),
            refresh_token_expires_at: timestamp(session.refresh_payload.expires_at),
        }))
    }

    async fn renew_access_token(
        &self,
        request: Request<RenewAccessTokenRequest>,
    ) -> Result<Response<RenewAccessTokenResponse>, Status> {
        let req = request.into_inner();
        let renewed = service::renew_access(&self.state, &req.refresh_token).await?;

        Ok(Response::new(RenewAccessTokenResponse {
            access_token_expires_at: timestamp(renewed.access_token_expires_at()),
            access_token: renewed.access_token,
        }))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        let principal = authorize_user(&self.state.guard, &request)?;
        let req = request.into_inner();

        let user = service::update_user(
            &self.state,
            &principal,
            &req.username,
            UserChanges {
                full_name: req.full_name,
                email: req.email,
                password: req.password,
            },
        )
        .await?;

        Ok(Response::new(UpdateUserResponse {
            user: Some(convert_user(user)),
        }))
    }
}
