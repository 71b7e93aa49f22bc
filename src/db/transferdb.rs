use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::transfermodel::{TransferRequest, TransferStatus};

#[async_trait]
pub trait TransferExt {
    async fn save_transfer_request<T: Into<String> + Send>(
        &self,
        parcel_id: Uuid,
        receiver_name: T,
        requested_by: Uuid,
    ) -> Result<TransferRequest, sqlx::Error>;

    async fn get_transfer_request(
        &self,
        transfer_id: Uuid,
    ) -> Result<Option<TransferRequest>, sqlx::Error>;

    async fn get_transfer_requests_by_requester(
        &self,
        requested_by: Uuid,
    ) -> Result<Vec<TransferRequest>, sqlx::Error>;

    async fn get_all_transfer_requests(&self) -> Result<Vec<TransferRequest>, sqlx::Error>;

    async fn update_transfer_status(
        &self,
        transfer_id: Uuid,
        status: TransferStatus,
    ) -> Result<TransferRequest, sqlx::Error>;

    async fn delete_transfer_request(&self, transfer_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl TransferExt for DBClient {
    async fn save_transfer_request<T: Into<String> + Send>(
        &self,
        parcel_id: Uuid,
        receiver_name: T,
        requested_by: Uuid,
    ) -> Result<TransferRequest, sqlx::Error> {
        sqlx::query_as::<_, TransferRequest>(
            r#"
            INSERT INTO transfer_requests (parcel_id, receiver_name, requested_by)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(parcel_id)
        .bind(receiver_name.into())
        .bind(requested_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_transfer_request(
        &self,
        transfer_id: Uuid,
    ) -> Result<Option<TransferRequest>, sqlx::Error> {
        sqlx::query_as::<_, TransferRequest>("SELECT * FROM transfer_requests WHERE id = $1")
            .bind(transfer_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_transfer_requests_by_requester(
        &self,
        requested_by: Uuid,
    ) -> Result<Vec<TransferRequest>, sqlx::Error> {
        sqlx::query_as::<_, TransferRequest>(
            "SELECT * FROM transfer_requests WHERE requested_by = $1 ORDER BY requested_at DESC",
        )
        .bind(requested_by)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_all_transfer_requests(&self) -> Result<Vec<TransferRequest>, sqlx::Error> {
        sqlx::query_as::<_, TransferRequest>(
            "SELECT * FROM transfer_requests ORDER BY requested_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn update_transfer_status(
        &self,
        transfer_id: Uuid,
        status: TransferStatus,
    ) -> Result<TransferRequest, sqlx::Error> {
        sqlx::query_as::<_, TransferRequest>(
            r#"
            UPDATE transfer_requests
            SET status = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(transfer_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_transfer_request(&self, transfer_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transfer_requests WHERE id = $1")
            .bind(transfer_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
