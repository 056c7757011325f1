pub mod order_code;
pub mod payment_status;
