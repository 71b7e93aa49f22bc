use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::surveymodel::{Survey, SurveyStatus};

#[async_trait]
pub trait SurveyExt {
    async fn save_survey(
        &self,
        parcel_id: Uuid,
        surveyor_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Survey, sqlx::Error>;

    async fn get_survey(&self, survey_id: Uuid) -> Result<Option<Survey>, sqlx::Error>;

    async fn get_survey_by_parcel(&self, parcel_id: Uuid) -> Result<Option<Survey>, sqlx::Error>;

    async fn get_surveys_by_surveyor(
        &self,
        surveyor_id: Uuid,
    ) -> Result<Vec<Survey>, sqlx::Error>;

    async fn get_all_surveys(&self) -> Result<Vec<Survey>, sqlx::Error>;

    async fn complete_survey(
        &self,
        survey_id: Uuid,
        feedback: &str,
    ) -> Result<Survey, sqlx::Error>;
}

#[async_trait]
impl SurveyExt for DBClient {
    async fn save_survey(
        &self,
        parcel_id: Uuid,
        surveyor_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Survey, sqlx::Error> {
        sqlx::query_as::<_, Survey>(
            r#"
            INSERT INTO surveys (parcel_id, surveyor_id, owner_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(parcel_id)
        .bind(surveyor_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_survey(&self, survey_id: Uuid) -> Result<Option<Survey>, sqlx::Error> {
        sqlx::query_as::<_, Survey>("SELECT * FROM surveys WHERE id = $1")
            .bind(survey_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_survey_by_parcel(&self, parcel_id: Uuid) -> Result<Option<Survey>, sqlx::Error> {
        sqlx::query_as::<_, Survey>("SELECT * FROM surveys WHERE parcel_id = $1")
            .bind(parcel_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_surveys_by_surveyor(
        &self,
        surveyor_id: Uuid,
    ) -> Result<Vec<Survey>, sqlx::Error> {
        sqlx::query_as::<_, Survey>(
            "SELECT * FROM surveys WHERE surveyor_id = $1 ORDER BY assigned_at DESC",
        )
        .bind(surveyor_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_all_surveys(&self) -> Result<Vec<Survey>, sqlx::Error> {
        sqlx::query_as::<_, Survey>("SELECT * FROM surveys ORDER BY assigned_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn complete_survey(
        &self,
        survey_id: Uuid,
        feedback: &str,
    ) -> Result<Survey, sqlx::Error> {
        sqlx::query_as::<_, Survey>(
            r#"
            UPDATE surveys
            SET status = $2, feedback = $3, completed_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(survey_id)
        .bind(SurveyStatus::Completed)
        .bind(feedback)
        .fetch_one(&self.pool)
        .await
    }
}
