use actix_web::{web, HttpResponse};

use crate::models::{PaymentIntentRequest, PaymentIntentResponse};
use crate::services::payment_service::{self, PaymentGateway};
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/api/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret for confirming the payment", body = PaymentIntentResponse),
        (status = 400, description = "Amount missing or not positive"),
        (status = 502, description = "Payment provider rejected the request")
    )
)]
pub async fn create_payment_intent(
    gateway: web::Data<dyn PaymentGateway>,
    body: web::Json<PaymentIntentRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("💳 POST /create-payment-intent - amount: {}", body.amount);

    let intent = payment_service::create_intent(gateway.get_ref(), body.amount).await?;
    Ok(HttpResponse::Ok().json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}
