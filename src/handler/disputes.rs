use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{disputedb::DisputeExt, parceldb::ParcelExt, userdb::UserExt},
    dtos::disputedtos::{CreateDisputeDto, UpdateDisputeStatusDto},
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::{disputemodel::Dispute, usermodel::UserRole},
    service::{error::WorkflowError, transition::StateTransitions},
    AppState,
};

pub fn disputes_handler() -> Router {
    Router::new()
        .route("/create", post(create_dispute))
        .route("/mine", get(get_my_disputes))
        .route("/:dispute_id", delete(withdraw_dispute))
        .route(
            "/admin/all",
            get(get_all_disputes).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/admin/:dispute_id/status",
            put(update_dispute_status).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

fn dispute_view(dispute: &Dispute, complainant: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": dispute.id,
        "disputeId": dispute.dispute_id,
        "parcelId": dispute.parcel_id,
        "parcelLR": dispute.parcel_lr,
        "complainant": complainant.or(dispute.complainant.as_deref()).unwrap_or("Unknown"),
        "defendant": dispute.defendant,
        "reason": dispute.reason,
        "status": dispute.status,
        "dateFiled": dispute.date_filed.format("%Y-%m-%d").to_string(),
    })
}

pub async fn create_dispute(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateDisputeDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let parcel = app_state
        .db_client
        .get_parcel(body.parcel_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::ParcelNotFound(body.parcel_id))?;

    let complainant = body.complainant.or_else(|| Some(user.user.name.clone()));

    let dispute = app_state
        .db_client
        .save_dispute(
            parcel.id,
            parcel.lr_number,
            complainant,
            body.defendant,
            body.reason,
            user.user.id,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "message": "Dispute filed successfully",
            "data": {
                "dispute": dispute_view(&dispute, None)
            }
        })),
    ))
}

pub async fn get_my_disputes(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let disputes = app_state
        .db_client
        .get_disputes_by_filer(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let dispute_data: Vec<serde_json::Value> =
        disputes.iter().map(|d| dispute_view(d, None)).collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "disputes": dispute_data,
            "total": dispute_data.len()
        }
    })))
}

pub async fn get_all_disputes(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let disputes = app_state
        .db_client
        .get_all_disputes()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut dispute_data = Vec::new();
    for dispute in &disputes {
        let filer = app_state
            .db_client
            .get_user(Some(dispute.filed_by), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        dispute_data.push(dispute_view(dispute, filer.as_ref().map(|u| u.name.as_str())));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "disputes": dispute_data,
            "total": dispute_data.len()
        }
    })))
}

pub async fn update_dispute_status(
    Path(dispute_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateDisputeStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let dispute = app_state
        .db_client
        .get_dispute(dispute_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::DisputeNotFound(dispute_id))?;

    dispute.status.ensure_transition(body.status)?;

    let updated = app_state
        .db_client
        .update_dispute_status(dispute_id, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Dispute status updated successfully",
        "data": {
            "dispute": dispute_view(&updated, None)
        }
    })))
}

pub async fn withdraw_dispute(
    Path(dispute_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let dispute = app_state
        .db_client
        .get_dispute(dispute_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::DisputeNotFound(dispute_id))?;

    if dispute.filed_by != user.user.id && user.user.role != UserRole::Admin {
        return Err(HttpError::forbidden(
            "Unauthorized to withdraw this dispute".to_string(),
        ));
    }

    app_state
        .db_client
        .delete_dispute(dispute_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Dispute withdrawn successfully"
    })))
}
