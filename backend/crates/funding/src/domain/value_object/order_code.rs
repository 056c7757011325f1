//! Order codes identify a transaction to the payment gateway.

use uuid::Uuid;

const ORDER_CODE_PREFIX: &str = "ORDER-";

/// New random order code, e.g. `ORDER-8F14E45FCEEA4C7B9A2B0E5C1D3F6A70`
pub fn generate_order_code() -> String {
    format!(
        "{ORDER_CODE_PREFIX}{}",
        Uuid::new_v4().simple().to_string().to_uppercase()
    )
}
