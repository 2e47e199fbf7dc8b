use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::utils::AppError;

const CURRENCY: &str = "usd";

#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// Provider that can open a payment intent for the browser to confirm.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, AppError>;
}

/// Dollars to cents, truncating any fraction of a cent.
pub fn to_minor_units(amount: f64) -> Result<i64, AppError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::InvalidRequest(format!(
            "amount must be a positive number, got {}",
            amount
        )));
    }
    Ok((amount * 100.0).trunc() as i64)
}

pub async fn create_intent(
    gateway: &dyn PaymentGateway,
    amount: f64,
) -> Result<PaymentIntent, AppError> {
    let cents = to_minor_units(amount)?;
    log::info!("💳 Creating payment intent: {} cents ({})", cents, CURRENCY);

    let intent = gateway.create_payment_intent(cents, CURRENCY).await?;
    log::info!("✅ Payment intent created: {}", intent.id);

    Ok(intent)
}

// Stripe API payloads
#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
}

/// Stripe's REST payment-intent endpoint.
pub struct StripeGateway {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    pub fn new(secret_key: &str, api_base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: secret_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, AppError> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        let amount = amount_minor.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorEnvelope>()
                .await
                .ok()
                .and_then(|envelope| envelope.error.message)
                .unwrap_or_else(|| status.to_string());
            return Err(AppError::PaymentError(message));
        }

        let intent: StripePaymentIntent = response.json().await?;
        let client_secret = intent.client_secret.ok_or_else(|| {
            AppError::PaymentError(format!("payment intent {} has no client secret", intent.id))
        })?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
        })
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::sync::Mutex;

    /// Records requested amounts and hands back a fixed secret.
    #[derive(Default)]
    pub struct FakeGateway {
        pub requests: Mutex<Vec<(i64, String)>>,
    }

    #[async_trait]
    impl PaymentGateway for FakeGateway {
        async fn create_payment_intent(
            &self,
            amount_minor: i64,
            currency: &str,
        ) -> Result<PaymentIntent, AppError> {
            self.requests
                .lock()
                .unwrap()
                .push((amount_minor, currency.to_string()));
            Ok(PaymentIntent {
                id: "pi_test".to_string(),
                client_secret: "pi_test_secret_abc".to_string(),
            })
        }
    }
}
