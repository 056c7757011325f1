//! Snap-style Payment Gateway Client
//!
//! Opens a hosted payment page: `POST {base_url}` with the order and the
//! customer, authenticated with HTTP basic auth (server key, empty password).
//! The gateway answers `{ "token": ..., "redirect_url": ... }`.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::gateway::{GatewayError, PaymentGateway, PaymentLink, PaymentRequest};

/// Sandbox endpoint of the hosted payment page API
pub const SANDBOX_SNAP_URL: &str = "https://app.sandbox.midtrans.com/snap/v1/transactions";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct SnapGateway {
    client: Client,
    base_url: String,
    server_key: String,
}

impl SnapGateway {
    pub fn new(
        base_url: impl Into<String>,
        server_key: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            server_key: server_key.into(),
        })
    }
}

#[derive(Serialize)]
struct SnapRequest<'a> {
    transaction_details: TransactionDetails<'a>,
    customer_details: CustomerDetails<'a>,
}

#[derive(Serialize)]
struct TransactionDetails<'a> {
    order_id: &'a str,
    gross_amount: i64,
}

#[derive(Serialize)]
struct CustomerDetails<'a> {
    first_name: &'a str,
    email: &'a str,
}

#[derive(Deserialize)]
struct SnapResponse {
    token: Option<String>,
    redirect_url: Option<String>,
}

impl PaymentGateway for SnapGateway {
    async fn create_payment(&self, request: &PaymentRequest) -> Result<PaymentLink, GatewayError> {
        let body = SnapRequest {
            transaction_details: TransactionDetails {
                order_id: &request.order_code,
                gross_amount: request.amount,
            },
            customer_details: CustomerDetails {
                first_name: &request.customer_name,
                email: &request.customer_email,
            },
        };

        let response = self
            .client
            .post(&self.base_url)
            .basic_auth(&self.server_key, Some(""))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SnapResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        match parsed.redirect_url {
            Some(redirect_url) if !redirect_url.is_empty() => Ok(PaymentLink {
                token: parsed.token,
                redirect_url,
            }),
            _ => Err(GatewayError::InvalidResponse(
                "missing redirect_url".to_string(),
            )),
        }
    }
}
