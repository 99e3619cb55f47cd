use actix_web::{HttpResponse, Responder};

/// Liveness probe; does not touch the database
pub async fn healthz() -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Content-Type", "text/plain; charset=utf-8"))
        .body("OK")
}
