use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::{
    dtos::parceldtos::UpdateParcelDto,
    models::parcelmodel::{Parcel, ParcelStatus},
};

#[async_trait]
pub trait ParcelExt {
    async fn save_parcel<T: Into<String> + Send>(
        &self,
        owner_id: Uuid,
        title_deed: T,
        lr_number: T,
        location: T,
        size: f64,
    ) -> Result<Parcel, sqlx::Error>;

    async fn get_parcel(&self, parcel_id: Uuid) -> Result<Option<Parcel>, sqlx::Error>;

    async fn get_all_parcels(&self) -> Result<Vec<Parcel>, sqlx::Error>;

    async fn get_parcels_by_owner(&self, owner_id: Uuid) -> Result<Vec<Parcel>, sqlx::Error>;

    async fn update_parcel(
        &self,
        parcel_id: Uuid,
        updates: UpdateParcelDto,
    ) -> Result<Option<Parcel>, sqlx::Error>;

    async fn update_parcel_status(
        &self,
        parcel_id: Uuid,
        status: ParcelStatus,
    ) -> Result<Parcel, sqlx::Error>;

    async fn delete_parcel(&self, parcel_id: Uuid) -> Result<u64, sqlx::Error>;

    async fn get_unassigned_parcels(&self) -> Result<Vec<Parcel>, sqlx::Error>;
}

#[async_trait]
impl ParcelExt for DBClient {
    async fn save_parcel<T: Into<String> + Send>(
        &self,
        owner_id: Uuid,
        title_deed: T,
        lr_number: T,
        location: T,
        size: f64,
    ) -> Result<Parcel, sqlx::Error> {
        sqlx::query_as::<_, Parcel>(
            r#"
            INSERT INTO parcels (owner_id, title_deed, lr_number, location, size)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(title_deed.into())
        .bind(lr_number.into())
        .bind(location.into())
        .bind(size)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_parcel(&self, parcel_id: Uuid) -> Result<Option<Parcel>, sqlx::Error> {
        sqlx::query_as::<_, Parcel>("SELECT * FROM parcels WHERE id = $1")
            .bind(parcel_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_all_parcels(&self) -> Result<Vec<Parcel>, sqlx::Error> {
        sqlx::query_as::<_, Parcel>("SELECT * FROM parcels ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn get_parcels_by_owner(&self, owner_id: Uuid) -> Result<Vec<Parcel>, sqlx::Error> {
        sqlx::query_as::<_, Parcel>(
            "SELECT * FROM parcels WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_parcel(
        &self,
        parcel_id: Uuid,
        updates: UpdateParcelDto,
    ) -> Result<Option<Parcel>, sqlx::Error> {
        sqlx::query_as::<_, Parcel>(
            r#"
            UPDATE parcels
            SET title_deed = COALESCE($2, title_deed),
                lr_number  = COALESCE($3, lr_number),
                location   = COALESCE($4, location),
                size       = COALESCE($5, size),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(parcel_id)
        .bind(updates.title_deed)
        .bind(updates.lr_number)
        .bind(updates.location)
        .bind(updates.size)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_parcel_status(
        &self,
        parcel_id: Uuid,
        status: ParcelStatus,
    ) -> Result<Parcel, sqlx::Error> {
        sqlx::query_as::<_, Parcel>(
            r#"
            UPDATE parcels
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(parcel_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_parcel(&self, parcel_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parcels WHERE id = $1")
            .bind(parcel_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_unassigned_parcels(&self) -> Result<Vec<Parcel>, sqlx::Error> {
        sqlx::query_as::<_, Parcel>(
            r#"
            SELECT p.* FROM parcels p
            WHERE NOT EXISTS (SELECT 1 FROM surveys s WHERE s.parcel_id = p.id)
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
