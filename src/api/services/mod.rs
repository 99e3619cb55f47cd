pub mod admin;
pub mod health;
pub mod redirect;

use actix_web::web;

use crate::errors::ShortcutsError;

/// Register every route on an app
///
/// The catch-all redirect goes last so it never shadows a named route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // 请求体解析失败统一返回 Validation 错误体
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ShortcutsError::validation(format!("Invalid request body: {}", err)).into()
    }))
    .route("/healthz", web::get().to(health::healthz))
    .configure(admin::auth_routes)
    .service(admin::api_routes())
    .route("/{code:.*}", web::get().to(redirect::redirect));
}
