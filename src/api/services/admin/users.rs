//! User management endpoints

use actix_web::{HttpResponse, web};

use crate::api::auth::{AdminUser, AuthenticatedUser};
use crate::api::state::AppState;
use crate::errors::Result;
use crate::services::UserInput;

use super::helpers::parse_id;
use super::types::{IdResponse, UserRequest, UserResponse, UsersResponse};

impl From<UserRequest> for UserInput {
    fn from(req: UserRequest) -> Self {
        UserInput {
            name: req.name,
            email: req.email,
            active: req.active,
            admin: req.admin,
        }
    }
}

/// The caller's own account
pub async fn current_user(user: AuthenticatedUser) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserResponse { user: user.0 }))
}

pub async fn list_users(_admin: AdminUser, state: web::Data<AppState>) -> Result<HttpResponse> {
    let users = state.users.list().await?;
    Ok(HttpResponse::Ok().json(UsersResponse { users }))
}

pub async fn create_user(
    _admin: AdminUser,
    state: web::Data<AppState>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse> {
    let id = state.users.create(body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(IdResponse { id }))
}

pub async fn update_user(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    state.users.update(id, body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(IdResponse { id }))
}

pub async fn delete_user(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    state.users.delete(id).await?;
    Ok(HttpResponse::Ok().json(IdResponse { id }))
}
