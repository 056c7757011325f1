//! Payment Gateway Port

use thiserror::Error;

/// What the gateway needs to open a payment page
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub order_code: String,
    pub amount: i64,
    pub customer_name: String,
    pub customer_email: String,
}

/// Gateway answer
#[derive(Debug, Clone)]
pub struct PaymentLink {
    pub token: Option<String>,
    pub redirect_url: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network failure or timeout
    #[error("payment gateway unreachable: {0}")]
    Unavailable(String),

    /// Non-success HTTP status
    #[error("payment gateway rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Success status with an unusable body
    #[error("payment gateway returned an invalid response: {0}")]
    InvalidResponse(String),
}

#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    async fn create_payment(&self, request: &PaymentRequest) -> Result<PaymentLink, GatewayError>;
}
