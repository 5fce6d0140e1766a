//! Payment provider client.
//!
//! Thin wrapper over the provider's REST API (Stripe-compatible): create a
//! payment intent for the cart total, retrieve it again at completion to
//! check it actually succeeded. Everything else - card collection, 3DS -
//! happens in the browser against the provider's own SDK.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use fournil_core::Price;

use crate::config::PaymentConfig;

/// Errors that can occur when talking to the payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("payment API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// Invalid configuration (unparseable key).
    #[error("payment configuration error: {0}")]
    Config(String),
}

/// Status of a payment intent, as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Succeeded,
    Canceled,
}

/// A payment intent.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Provider-assigned intent ID.
    pub id: String,
    /// Secret handed to the browser SDK to collect the card.
    pub client_secret: Option<String>,
    /// Current status.
    pub status: PaymentIntentStatus,
    /// Amount in the smallest currency unit (euro cents).
    pub amount: i64,
}

impl PaymentIntent {
    /// Whether the intent has been paid for the expected total.
    #[must_use]
    pub fn is_paid(&self, expected: Price) -> bool {
        self.status == PaymentIntentStatus::Succeeded && self.amount == expected.cents()
    }
}

/// Client for the payment provider API.
#[derive(Clone)]
pub struct PaymentClient {
    client: reqwest::Client,
    base_url: String,
}

impl PaymentClient {
    /// Create a new payment client.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Config` if the secret key cannot be used in
    /// an HTTP header.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.secret_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| PaymentError::Config(format!("invalid secret key: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a payment intent for an order total.
    ///
    /// The idempotency key makes a retried request return the original
    /// intent instead of charging twice.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the provider call fails.
    #[instrument(skip(self))]
    pub async fn create_intent(&self, amount: Price) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.base_url);
        let amount_value = amount.cents().to_string();

        let params: Vec<(&str, &str)> = vec![
            ("amount", amount_value.as_str()),
            ("currency", "eur"),
            ("automatic_payment_methods[enabled]", "true"),
        ];

        let response = self
            .client
            .post(&url)
            .header("Idempotency-Key", Uuid::new_v4().to_string())
            .form(&params)
            .send()
            .await?;

        Self::parse_intent(response).await
    }

    /// Retrieve a payment intent by ID.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the provider call fails.
    #[instrument(skip(self))]
    pub async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/v1/payment_intents/{intent_id}", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::parse_intent(response).await
    }

    async fn parse_intent(response: reqwest::Response) -> Result<PaymentIntent, PaymentError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(500)
                .collect();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_deserializes() {
        let json = r#"{
            "id": "pi_3MtwBwLkdIwHu7ix28a3tqPa",
            "client_secret": "pi_3MtwBwLkdIwHu7ix28a3tqPa_secret_YrKJUKribcBjcG8HVhfZluoGH",
            "status": "requires_payment_method",
            "amount": 2350
        }"#;

        let intent: PaymentIntent = serde_json::from_str(json).unwrap();
        assert_eq!(intent.status, PaymentIntentStatus::RequiresPaymentMethod);
        assert_eq!(intent.amount, 2350);
    }

    #[test]
    fn test_is_paid_checks_status_and_amount() {
        let intent = PaymentIntent {
            id: "pi_1".to_string(),
            client_secret: None,
            status: PaymentIntentStatus::Succeeded,
            amount: 2350,
        };

        assert!(intent.is_paid(Price::from_cents(2350)));
        // Wrong amount: a tampered form must not complete checkout
        assert!(!intent.is_paid(Price::from_cents(100)));

        let unpaid = PaymentIntent {
            status: PaymentIntentStatus::Processing,
            ..intent
        };
        assert!(!unpaid.is_paid(Price::from_cents(2350)));
    }
}
