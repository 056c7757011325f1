//! Domain Layer

pub mod entity;
pub mod gateway;
pub mod repository;
pub mod value_object;

pub use entity::transaction::{NewTransaction, Transaction};
pub use gateway::PaymentGateway;
pub use repository::{SettleOutcome, TransactionRepository};
