use async_trait::async_trait;
use rand::{distr::Alphanumeric, rng, Rng};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::disputemodel::{Dispute, DisputeStatus};

#[async_trait]
pub trait DisputeExt {
    async fn save_dispute<T: Into<String> + Send>(
        &self,
        parcel_id: Uuid,
        parcel_lr: T,
        complainant: Option<String>,
        defendant: T,
        reason: T,
        filed_by: Uuid,
    ) -> Result<Dispute, sqlx::Error>;

    async fn get_dispute(&self, dispute_id: Uuid) -> Result<Option<Dispute>, sqlx::Error>;

    async fn get_disputes_by_filer(&self, filed_by: Uuid) -> Result<Vec<Dispute>, sqlx::Error>;

    async fn get_all_disputes(&self) -> Result<Vec<Dispute>, sqlx::Error>;

    async fn update_dispute_status(
        &self,
        dispute_id: Uuid,
        status: DisputeStatus,
    ) -> Result<Dispute, sqlx::Error>;

    async fn delete_dispute(&self, dispute_id: Uuid) -> Result<u64, sqlx::Error>;
}

impl DBClient {
    // Human-facing reference of the form DSP-k7Xq2wF9
    fn generate_dispute_ref(&self) -> String {
        let token: String = rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();
        format!("DSP-{}", token)
    }
}

#[async_trait]
impl DisputeExt for DBClient {
    async fn save_dispute<T: Into<String> + Send>(
        &self,
        parcel_id: Uuid,
        parcel_lr: T,
        complainant: Option<String>,
        defendant: T,
        reason: T,
        filed_by: Uuid,
    ) -> Result<Dispute, sqlx::Error> {
        sqlx::query_as::<_, Dispute>(
            r#"
            INSERT INTO disputes (dispute_id, parcel_id, parcel_lr, complainant, defendant, reason, filed_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(self.generate_dispute_ref())
        .bind(parcel_id)
        .bind(parcel_lr.into())
        .bind(complainant)
        .bind(defendant.into())
        .bind(reason.into())
        .bind(filed_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_dispute(&self, dispute_id: Uuid) -> Result<Option<Dispute>, sqlx::Error> {
        sqlx::query_as::<_, Dispute>("SELECT * FROM disputes WHERE id = $1")
            .bind(dispute_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_disputes_by_filer(&self, filed_by: Uuid) -> Result<Vec<Dispute>, sqlx::Error> {
        sqlx::query_as::<_, Dispute>(
            "SELECT * FROM disputes WHERE filed_by = $1 ORDER BY date_filed DESC",
        )
        .bind(filed_by)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_all_disputes(&self) -> Result<Vec<Dispute>, sqlx::Error> {
        sqlx::query_as::<_, Dispute>("SELECT * FROM disputes ORDER BY date_filed DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn update_dispute_status(
        &self,
        dispute_id: Uuid,
        status: DisputeStatus,
    ) -> Result<Dispute, sqlx::Error> {
        sqlx::query_as::<_, Dispute>(
            r#"
            UPDATE disputes
            SET status = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(dispute_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_dispute(&self, dispute_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM disputes WHERE id = $1")
            .bind(dispute_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
