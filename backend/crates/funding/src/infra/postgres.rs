//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{CampaignId, TransactionId, UserId};
use sqlx::PgPool;

use crate::domain::entity::transaction::{NewTransaction, Transaction};
use crate::domain::repository::{SettleOutcome, TransactionRepository};
use crate::domain::value_object::payment_status::PaymentStatus;
use crate::error::{FundingError, FundingResult};

const TRANSACTION_COLUMNS: &str = r#"
    id,
    campaign_id,
    user_id,
    amount,
    status,
    code,
    payment_url,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed transaction repository
#[derive(Clone)]
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `column` is one of the fixed key columns below, never user input
    async fn list_by(&self, column: Option<(&str, i64)>) -> FundingResult<Vec<Transaction>> {
        let rows = match column {
            Some((column, id)) => {
                sqlx::query_as::<_, TransactionRow>(&format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE {column} = $1 ORDER BY id DESC"
                ))
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, TransactionRow>(&format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY id DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(TransactionRow::into_transaction).collect()
    }
}

impl TransactionRepository for PgTransactionRepository {
    async fn create(&self, transaction: &NewTransaction) -> FundingResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            INSERT INTO transactions (campaign_id, user_id, amount, status, code)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(transaction.campaign_id.get())
        .bind(transaction.user_id.get())
        .bind(transaction.amount)
        .bind(PaymentStatus::Pending.code())
        .bind(&transaction.code)
        .fetch_one(&self.pool)
        .await?;

        row.into_transaction()
    }

    async fn set_payment_url(&self, id: TransactionId, url: &str) -> FundingResult<()> {
        sqlx::query(
            "UPDATE transactions SET payment_url = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.get())
        .bind(url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> FundingResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TransactionRow::into_transaction).transpose()
    }

    async fn list_by_campaign(&self, campaign_id: CampaignId) -> FundingResult<Vec<Transaction>> {
        self.list_by(Some(("campaign_id", campaign_id.get()))).await
    }

    async fn list_by_user(&self, user_id: UserId) -> FundingResult<Vec<Transaction>> {
        self.list_by(Some(("user_id", user_id.get()))).await
    }

    async fn list_all(&self) -> FundingResult<Vec<Transaction>> {
        self.list_by(None).await
    }

    async fn settle(&self, code: &str, status: PaymentStatus) -> FundingResult<SettleOutcome> {
        let mut tx = self.pool.begin().await?;

        // Only a pending row can move; concurrent replays lose the race here
        let swapped = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            UPDATE transactions
            SET status = $2, updated_at = NOW()
            WHERE code = $1 AND status = 'pending'
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(code)
        .bind(status.code())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = swapped else {
            tx.rollback().await?;
            return Ok(match self.find_by_code(code).await? {
                Some(existing) => SettleOutcome::AlreadyFinal(existing),
                None => SettleOutcome::NotFound,
            });
        };

        let transaction = row.into_transaction()?;

        if transaction.status == PaymentStatus::Paid {
            let credited = sqlx::query(
                r#"
                UPDATE campaigns
                SET current_amount = current_amount + $2,
                    backer_count = backer_count + 1,
                    updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(transaction.campaign_id.get())
            .bind(transaction.amount)
            .execute(&mut *tx)
            .await?;

            if credited.rows_affected() == 0 {
                return Err(FundingError::Internal(format!(
                    "campaign {} missing for transaction {}",
                    transaction.campaign_id, transaction.id
                )));
            }
        }

        tx.commit().await?;

        Ok(SettleOutcome::Applied(transaction))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    campaign_id: i64,
    user_id: i64,
    amount: i64,
    status: String,
    code: String,
    payment_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_transaction(self) -> FundingResult<Transaction> {
        let status = PaymentStatus::from_code(&self.status).ok_or_else(|| {
            FundingError::Internal(format!("unknown transaction status: {}", self.status))
        })?;

        Ok(Transaction {
            id: TransactionId::from_raw(self.id),
            campaign_id: CampaignId::from_raw(self.campaign_id),
            user_id: UserId::from_raw(self.user_id),
            amount: self.amount,
            status,
            code: self.code,
            payment_url: self.payment_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
