use thiserror::Error;

#[derive(Debug, Error)]
pub enum KhqrError {
    #[error("invalid amount: must be a positive, finite decimal")]
    InvalidAmount,
    #[error("unsupported currency: {0} (supported: USD, KHR)")]
    UnsupportedCurrency(String),
    #[error("field {tag} is too long: {length} bytes exceed the {max} byte limit")]
    FieldTooLong {
        tag: &'static str,
        length: usize,
        max: usize,
    },
    #[error("failed to render QR code: {0}")]
    RenderError(String),
    #[error("transaction reference must not be empty")]
    EmptyReference,
    #[error("settlement authority unavailable: {0}")]
    SettlementUnavailable(String),
    #[error("malformed KHQR payload: {0}")]
    InvalidPayload(String),
}
