//! Shortcut management endpoints

use actix_web::{HttpResponse, web};
use tracing::trace;

use crate::api::auth::AuthenticatedUser;
use crate::api::state::AppState;
use crate::errors::Result;
use crate::services::ShortcutInput;
use crate::storage::ShortcutFilter;

use super::helpers::parse_id;
use super::types::{IdResponse, ShortcutListQuery, ShortcutListResponse, ShortcutRequest};

pub async fn list_shortcuts(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<ShortcutListQuery>,
) -> Result<HttpResponse> {
    let filter = ShortcutFilter {
        code_prefix: query.code.clone().filter(|c| !c.is_empty()),
        limit: query.limit(),
        page: query.page(),
    };
    trace!("Listing shortcuts with {:?}", filter);

    let (shortcuts, total_count) = state.shortcuts.list(&filter).await?;
    Ok(HttpResponse::Ok().json(ShortcutListResponse {
        shortcuts,
        total_count,
    }))
}

pub async fn create_shortcut(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    body: web::Json<ShortcutRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let id = state
        .shortcuts
        .create(
            ShortcutInput {
                code: body.code,
                url: body.url,
            },
            user.id,
        )
        .await?;
    Ok(HttpResponse::Ok().json(IdResponse { id }))
}

pub async fn update_shortcut(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ShortcutRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    let body = body.into_inner();
    state
        .shortcuts
        .update(
            id,
            ShortcutInput {
                code: body.code,
                url: body.url,
            },
            user.id,
        )
        .await?;
    Ok(HttpResponse::Ok().json(IdResponse { id }))
}

pub async fn delete_shortcut(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    state.shortcuts.delete(id, user.id).await?;
    Ok(HttpResponse::Ok().json(IdResponse { id }))
}

/// Today, this week and this month in one response
pub async fn top_shortcuts(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let report = state.leaderboard.all_windows().await?;
    Ok(HttpResponse::Ok().json(report))
}
