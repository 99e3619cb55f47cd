//! Admin API 路由配置

use actix_web::web;

use super::auth::{callback, login, logout};
use super::shortcuts::{
    create_shortcut, delete_shortcut, list_shortcuts, top_shortcuts, update_shortcut,
};
use super::users::{create_user, current_user, delete_user, list_users, update_user};

/// 短链接管理路由 `/shortcuts`
pub fn shortcuts_routes() -> actix_web::Scope {
    web::scope("/shortcuts")
        .route("", web::get().to(list_shortcuts))
        .route("", web::post().to(create_shortcut))
        // Must be before /{id}
        .route("/top", web::get().to(top_shortcuts))
        .route("/{id}", web::put().to(update_shortcut))
        .route("/{id}", web::delete().to(delete_shortcut))
}

/// 用户管理路由 `/users`
pub fn users_routes() -> actix_web::Scope {
    web::scope("/users")
        .route("", web::get().to(list_users))
        .route("", web::post().to(create_user))
        .route("/me", web::get().to(current_user))
        .route("/{id}", web::put().to(update_user))
        .route("/{id}", web::delete().to(delete_user))
}

/// JSON API under `/api`
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .service(shortcuts_routes())
        .service(users_routes())
}

/// Browser login flow at the root
pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::get().to(login))
        .route("/logout", web::get().to(logout))
        .route("/auth/callback", web::get().to(callback));
}
