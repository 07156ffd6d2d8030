use actix_web::{error::ResponseError, HttpResponse};
use derive_more::Display;
use khqr_api::error::KhqrError;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display("Internal Server Error")]
    InternalError,
    #[display("{_0}")]
    BadClientData(String),
    #[display("Settlement authority unavailable")]
    SettlementUnavailable,
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::InternalError => {
                HttpResponse::InternalServerError().json("Internal Server Error")
            }
            ApiError::BadClientData(detail) => HttpResponse::BadRequest().json(detail),
            ApiError::SettlementUnavailable => {
                HttpResponse::ServiceUnavailable().json("Settlement authority unavailable")
            }
        }
    }
}

impl From<KhqrError> for ApiError {
    fn from(err: KhqrError) -> Self {
        match err {
            KhqrError::InvalidAmount
            | KhqrError::UnsupportedCurrency(_)
            | KhqrError::FieldTooLong { .. }
            | KhqrError::EmptyReference
            | KhqrError::InvalidPayload(_) => ApiError::BadClientData(err.to_string()),
            KhqrError::SettlementUnavailable(_) => ApiError::SettlementUnavailable,
            KhqrError::RenderError(_) => ApiError::InternalError,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<KhqrError>() {
            Some(KhqrError::SettlementUnavailable(_)) => ApiError::SettlementUnavailable,
            Some(e) => ApiError::BadClientData(e.to_string()),
            None => ApiError::InternalError,
        }
    }
}
