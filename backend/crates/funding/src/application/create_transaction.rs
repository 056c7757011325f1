//! Create Transaction Use Case
//!
//! The transaction is stored `pending` before the gateway is called, so a
//! gateway failure leaves an auditable pending row without a payment URL.

use std::sync::Arc;

use account::User;
use campaign::CampaignRepository;
use kernel::id::CampaignId;

use crate::domain::entity::transaction::{NewTransaction, Transaction};
use crate::domain::gateway::{PaymentGateway, PaymentRequest};
use crate::domain::repository::TransactionRepository;
use crate::domain::value_object::order_code::generate_order_code;
use crate::error::{FundingError, FundingResult};

pub struct CreateTransactionInput {
    pub campaign_id: CampaignId,
    pub amount: i64,
}

pub struct CreateTransactionUseCase<T, C, G>
where
    T: TransactionRepository,
    C: CampaignRepository,
    G: PaymentGateway,
{
    transaction_repo: Arc<T>,
    campaign_repo: Arc<C>,
    gateway: Arc<G>,
}

impl<T, C, G> CreateTransactionUseCase<T, C, G>
where
    T: TransactionRepository,
    C: CampaignRepository,
    G: PaymentGateway,
{
    pub fn new(transaction_repo: Arc<T>, campaign_repo: Arc<C>, gateway: Arc<G>) -> Self {
        Self {
            transaction_repo,
            campaign_repo,
            gateway,
        }
    }

    pub async fn execute(
        &self,
        payer: &User,
        input: CreateTransactionInput,
    ) -> FundingResult<Transaction> {
        if input.amount <= 0 {
            return Err(FundingError::invalid("amount must be greater than 0"));
        }

        let campaign = self
            .campaign_repo
            .find_by_id(input.campaign_id)
            .await?
            .ok_or(FundingError::CampaignNotFound)?;

        if !campaign.is_open() {
            return Err(FundingError::CampaignClosed);
        }

        let mut transaction = self
            .transaction_repo
            .create(&NewTransaction {
                campaign_id: campaign.id,
                user_id: payer.id,
                amount: input.amount,
                code: generate_order_code(),
            })
            .await?;

        let link = self
            .gateway
            .create_payment(&PaymentRequest {
                order_code: transaction.code.clone(),
                amount: transaction.amount,
                customer_name: payer.name.clone(),
                customer_email: payer.email.to_string(),
            })
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    transaction_id = %transaction.id,
                    code = %transaction.code,
                    error = %e,
                    "Payment link not created, transaction left pending"
                );
            })?;

        self.transaction_repo
            .set_payment_url(transaction.id, &link.redirect_url)
            .await?;
        transaction.payment_url = Some(link.redirect_url);

        tracing::info!(
            transaction_id = %transaction.id,
            campaign_id = %campaign.id,
            user_id = %payer.id,
            amount = transaction.amount,
            "Transaction created"
        );

        Ok(transaction)
    }
}
