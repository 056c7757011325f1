//! PostgreSQL Repository Implementation

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{CampaignId, CampaignImageId, UserId};
use sqlx::PgPool;

use crate::domain::entity::campaign::{Campaign, NewCampaign};
use crate::domain::entity::campaign_image::{CampaignImage, NewCampaignImage};
use crate::domain::repository::CampaignRepository;
use crate::error::{CampaignError, CampaignResult};

const CAMPAIGN_COLUMNS: &str = r#"
    id,
    user_id,
    name,
    short_description,
    description,
    perks,
    backer_count,
    goal_amount,
    current_amount,
    slug,
    created_at,
    updated_at
"#;

const IMAGE_COLUMNS: &str = "id, campaign_id, file_name, is_primary, created_at, updated_at";

/// PostgreSQL-backed campaign repository
#[derive(Clone)]
pub struct PgCampaignRepository {
    pool: PgPool,
}

impl PgCampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load images for the given campaigns and attach them
    async fn with_images(&self, rows: Vec<CampaignRow>) -> CampaignResult<Vec<Campaign>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let images = sqlx::query_as::<_, ImageRow>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM campaign_images WHERE campaign_id = ANY($1) ORDER BY id"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_campaign: HashMap<i64, Vec<CampaignImage>> = HashMap::new();
        for image in images {
            by_campaign
                .entry(image.campaign_id)
                .or_default()
                .push(image.into_image());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let images = by_campaign.remove(&row.id).unwrap_or_default();
                row.into_campaign(images)
            })
            .collect())
    }
}

impl CampaignRepository for PgCampaignRepository {
    async fn list(&self, owner: Option<UserId>) -> CampaignResult<Vec<Campaign>> {
        let rows = sqlx::query_as::<_, CampaignRow>(&format!(
            r#"
            SELECT {CAMPAIGN_COLUMNS}
            FROM campaigns
            WHERE ($1::BIGINT IS NULL OR user_id = $1)
            ORDER BY id DESC
            "#
        ))
        .bind(owner.map(|id| id.get()))
        .fetch_all(&self.pool)
        .await?;

        self.with_images(rows).await
    }

    async fn find_by_id(&self, id: CampaignId) -> CampaignResult<Option<Campaign>> {
        let row = sqlx::query_as::<_, CampaignRow>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_images(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, campaign: &NewCampaign) -> CampaignResult<Campaign> {
        // The ID is drawn first so the slug can end with it
        let row = sqlx::query_as::<_, CampaignRow>(&format!(
            r#"
            WITH next AS (
                SELECT nextval(pg_get_serial_sequence('campaigns', 'id')) AS id
            )
            INSERT INTO campaigns (
                id,
                user_id,
                name,
                short_description,
                description,
                perks,
                goal_amount,
                slug
            )
            SELECT next.id, $1, $2, $3, $4, $5, $6, $7 || '-' || next.id::TEXT
            FROM next
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(campaign.user_id.get())
        .bind(&campaign.details.name)
        .bind(&campaign.details.short_description)
        .bind(&campaign.details.description)
        .bind(&campaign.details.perks)
        .bind(campaign.details.goal_amount)
        .bind(&campaign.slug_base)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_campaign(Vec::new()))
    }

    async fn update(&self, campaign: &Campaign) -> CampaignResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE campaigns SET
                name = $2,
                short_description = $3,
                description = $4,
                perks = $5,
                goal_amount = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(campaign.id.get())
        .bind(&campaign.name)
        .bind(&campaign.short_description)
        .bind(&campaign.description)
        .bind(&campaign.perks)
        .bind(campaign.goal_amount)
        .bind(campaign.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CampaignError::NotFound);
        }

        Ok(())
    }

    async fn add_image(&self, image: &NewCampaignImage) -> CampaignResult<CampaignImage> {
        let mut tx = self.pool.begin().await?;

        if image.is_primary {
            sqlx::query(
                r#"
                UPDATE campaign_images
                SET is_primary = FALSE, updated_at = NOW()
                WHERE campaign_id = $1 AND is_primary
                "#,
            )
            .bind(image.campaign_id.get())
            .execute(&mut *tx)
            .await?;
        }

        let row = sqlx::query_as::<_, ImageRow>(&format!(
            r#"
            INSERT INTO campaign_images (campaign_id, file_name, is_primary)
            VALUES ($1, $2, $3)
            RETURNING {IMAGE_COLUMNS}
            "#
        ))
        .bind(image.campaign_id.get())
        .bind(&image.file_name)
        .bind(image.is_primary)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_image())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CampaignRow {
    id: i64,
    user_id: i64,
    name: String,
    short_description: String,
    description: String,
    perks: String,
    backer_count: i64,
    goal_amount: i64,
    current_amount: i64,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CampaignRow {
    fn into_campaign(self, images: Vec<CampaignImage>) -> Campaign {
        Campaign {
            id: CampaignId::from_raw(self.id),
            user_id: UserId::from_raw(self.user_id),
            name: self.name,
            short_description: self.short_description,
            description: self.description,
            perks: self.perks,
            backer_count: self.backer_count,
            goal_amount: self.goal_amount,
            current_amount: self.current_amount,
            slug: self.slug,
            images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ImageRow {
    id: i64,
    campaign_id: i64,
    file_name: String,
    is_primary: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ImageRow {
    fn into_image(self) -> CampaignImage {
        CampaignImage {
            id: CampaignImageId::from_raw(self.id),
            campaign_id: CampaignId::from_raw(self.campaign_id),
            file_name: self.file_name,
            is_primary: self.is_primary,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
