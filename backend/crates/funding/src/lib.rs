//! Funding Backend Module
//!
//! Pledges (transactions) against campaigns and their payment lifecycle:
//! - `domain/` - Transaction entity, payment status, repository and gateway ports
//! - `application/` - Create, list, and gateway notification use cases
//! - `infra/` - PostgreSQL and in-memory repositories, Snap-style HTTP gateway
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! A transaction is created `pending` and is finalized exactly once, by a
//! signed gateway notification. Finalizing as `paid` credits the campaign in
//! the same database transaction.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::FundingConfig;
pub use domain::entity::transaction::Transaction;
pub use domain::gateway::{GatewayError, PaymentGateway, PaymentLink, PaymentRequest};
pub use domain::repository::TransactionRepository;
pub use domain::value_object::payment_status::PaymentStatus;
pub use error::{FundingError, FundingResult};
pub use infra::memory::InMemoryTransactionRepository;
pub use infra::postgres::PgTransactionRepository;
pub use infra::snap::SnapGateway;
pub use presentation::router::{funding_router, funding_router_generic};
