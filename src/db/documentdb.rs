use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::documentmodel::{Document, DocumentType};

#[async_trait]
pub trait DocumentExt {
    async fn save_document<T: Into<String> + Send>(
        &self,
        name: T,
        doc_type: DocumentType,
        parcel_id: Uuid,
        date_issued: DateTime<Utc>,
        file_url: T,
        uploaded_by: Uuid,
    ) -> Result<Document, sqlx::Error>;

    async fn get_document(&self, document_id: Uuid) -> Result<Option<Document>, sqlx::Error>;

    async fn get_documents_by_uploader(
        &self,
        uploaded_by: Uuid,
    ) -> Result<Vec<Document>, sqlx::Error>;

    async fn get_all_documents(&self) -> Result<Vec<Document>, sqlx::Error>;

    async fn delete_document(&self, document_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl DocumentExt for DBClient {
    async fn save_document<T: Into<String> + Send>(
        &self,
        name: T,
        doc_type: DocumentType,
        parcel_id: Uuid,
        date_issued: DateTime<Utc>,
        file_url: T,
        uploaded_by: Uuid,
    ) -> Result<Document, sqlx::Error> {
        sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (name, doc_type, parcel_id, date_issued, file_url, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(name.into())
        .bind(doc_type)
        .bind(parcel_id)
        .bind(date_issued)
        .bind(file_url.into())
        .bind(uploaded_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_document(&self, document_id: Uuid) -> Result<Option<Document>, sqlx::Error> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(document_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_documents_by_uploader(
        &self,
        uploaded_by: Uuid,
    ) -> Result<Vec<Document>, sqlx::Error> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE uploaded_by = $1 ORDER BY created_at DESC",
        )
        .bind(uploaded_by)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_all_documents(&self) -> Result<Vec<Document>, sqlx::Error> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn delete_document(&self, document_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(document_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
