use std::time::Duration;

use actix_web::{web, HttpResponse};
use tracing::info;

use khqr_api::{
    get_authority,
    merchant::Currency,
    payload::{build_payload, Initiation, PaymentRequest},
    qr,
    verify::{self, SettlementAuthority},
};

use crate::api::{
    errors::ApiError,
    models::{GenerateParams, GenerateResponse, MerchantInfoResponse},
};
use crate::settings::Settings;

/// Bound on the settlement authority call; the stub answers instantly but a
/// real authority is a fallible external dependency.
const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn generate_khqr(
    settings: web::Data<Settings>,
    params: web::Json<GenerateParams>,
) -> Result<HttpResponse, ApiError> {
    // boundary contract: amounts are validated here, before the codec
    if params.amount <= 0.0 {
        return Err(ApiError::BadClientData(
            "Amount must be greater than 0".to_string(),
        ));
    }
    if params.amount < settings.min_amount {
        return Err(ApiError::BadClientData(
            "Amount is below the minimum limit".to_string(),
        ));
    }
    if params.amount > settings.max_amount {
        return Err(ApiError::BadClientData(
            "Amount exceeds maximum limit".to_string(),
        ));
    }

    let profile = settings.profile()?;
    let reference = verify::new_reference();
    let request = PaymentRequest {
        amount: Some(params.amount),
        currency: profile.currency,
        bill_reference: params.bill_number.clone(),
        transaction_reference: Some(reference.clone()),
        initiation: Initiation::Dynamic,
    };

    let payload = build_payload(&profile, &request)?;
    let qr_code = qr::render_data_uri(&payload)?;

    info!(amount = params.amount, reference, "generated KHQR payload");
    Ok(HttpResponse::Ok().json(GenerateResponse {
        payload,
        qr_code,
        amount: params.amount,
        merchant_name: profile.merchant_name,
        account_number: profile.account_number,
        transaction_reference: reference,
    }))
}

pub async fn verify_payment(path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let reference = path.into_inner();
    let authority = get_authority();
    let result = tokio::time::timeout(VERIFY_TIMEOUT, authority.verify(&reference))
        .await
        .map_err(|_| ApiError::SettlementUnavailable)??;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn merchant_info(settings: web::Data<Settings>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(MerchantInfoResponse {
        merchant_name: settings.merchant_name.clone(),
        merchant_city: settings.merchant_city.clone(),
        country_code: settings.country_code.clone(),
        currency_code: settings.currency.clone(),
        supported_currencies: vec![Currency::Usd.to_string(), Currency::Khr.to_string()],
        max_amount: settings.max_amount,
        min_amount: settings.min_amount,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};

    use crate::api::models::GenerateParams;
    use crate::api::routes::configure_routes;
    use crate::settings::Settings;

    async fn generate_status(amount: f64) -> StatusCode {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Settings::default()))
                .configure(configure_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/khqr/generate")
            .set_json(GenerateParams {
                amount,
                bill_number: None,
            })
            .to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_generate_enforces_amount_bounds() {
        // defaults advertise min 0.01 and max 10 000
        assert_eq!(generate_status(0.001).await, StatusCode::BAD_REQUEST);
        assert_eq!(generate_status(-5.0).await, StatusCode::BAD_REQUEST);
        assert_eq!(generate_status(10_000.01).await, StatusCode::BAD_REQUEST);
        assert_eq!(generate_status(4.50).await, StatusCode::OK);
    }
}
