use crate::api::handlers::{generate_khqr, merchant_info, verify_payment};
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/khqr/generate")
            .route(web::post().to(generate_khqr))
    )
    .service(
        web::resource("/khqr/verify/{reference}")
            .route(web::post().to(verify_payment))
    )
    .service(
        web::resource("/khqr/merchant-info")
            .route(web::get().to(merchant_info))
    );
}
