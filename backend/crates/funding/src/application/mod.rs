//! Application Layer

pub mod config;
pub mod create_transaction;
pub mod handle_notification;
pub mod list_transactions;

pub use config::FundingConfig;
pub use create_transaction::{CreateTransactionInput, CreateTransactionUseCase};
pub use handle_notification::{
    HandleNotificationUseCase, Notification, NotificationOutcome, notification_signature,
};
pub use list_transactions::{ListTransactionsUseCase, TransactionView};
