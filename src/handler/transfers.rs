use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{parceldb::ParcelExt, transferdb::TransferExt, userdb::UserExt},
    dtos::transferdtos::CreateTransferRequestDto,
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::{
        transfermodel::{TransferRequest, TransferStatus},
        usermodel::UserRole,
    },
    service::{error::WorkflowError, transition::StateTransitions},
    AppState,
};

pub fn transfers_handler() -> Router {
    Router::new()
        .route("/request", post(create_transfer_request))
        .route("/mine", get(get_my_transfer_requests))
        .route("/cancel/:transfer_id", delete(cancel_transfer_request))
        .route(
            "/all",
            get(get_all_transfer_requests).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/approve/:transfer_id",
            patch(approve_transfer).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/reject/:transfer_id",
            patch(reject_transfer).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

pub async fn create_transfer_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateTransferRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let parcel = app_state
        .db_client
        .get_parcel(body.parcel_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::ParcelNotFound(body.parcel_id))?;

    if parcel.owner_id != user.user.id {
        return Err(HttpError::forbidden(
            "You are not the owner of this parcel".to_string(),
        ));
    }

    let transfer = app_state
        .db_client
        .save_transfer_request(body.parcel_id, body.receiver_name, user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "message": "Transfer request created successfully",
            "data": {
                "transfer": transfer
            }
        })),
    ))
}

pub async fn get_my_transfer_requests(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let transfers = app_state
        .db_client
        .get_transfer_requests_by_requester(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut transfer_data = Vec::new();
    for transfer in &transfers {
        let parcel = app_state
            .db_client
            .get_parcel(transfer.parcel_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        transfer_data.push(serde_json::json!({
            "transfer": transfer,
            "parcelLR": parcel.map(|p| p.lr_number),
        }));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "transfers": transfer_data,
            "total": transfer_data.len()
        }
    })))
}

pub async fn get_all_transfer_requests(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let transfers = app_state
        .db_client
        .get_all_transfer_requests()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut transfer_data = Vec::new();
    for transfer in &transfers {
        let parcel = app_state
            .db_client
            .get_parcel(transfer.parcel_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        let requester = app_state
            .db_client
            .get_user(Some(transfer.requested_by), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        transfer_data.push(serde_json::json!({
            "transfer": transfer,
            "parcelLR": parcel.map(|p| p.lr_number),
            "requestedBy": requester.map(|u| serde_json::json!({
                "id": u.id,
                "name": u.name,
                "email": u.email,
            })),
        }));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "transfers": transfer_data,
            "total": transfer_data.len()
        }
    })))
}

pub async fn approve_transfer(
    Path(transfer_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    set_transfer_status(&app_state, transfer_id, TransferStatus::Approved)
        .await
        .map(|transfer| {
            Json(serde_json::json!({
                "status": "success",
                "message": "Transfer approved successfully",
                "data": {
                    "transfer": transfer
                }
            }))
        })
}

pub async fn reject_transfer(
    Path(transfer_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    set_transfer_status(&app_state, transfer_id, TransferStatus::Rejected)
        .await
        .map(|transfer| {
            Json(serde_json::json!({
                "status": "success",
                "message": "Transfer request rejected",
                "data": {
                    "transfer": transfer
                }
            }))
        })
}

// Approval does not reassign the parcel's owner: the receiver is recorded by
// name only, so the approved request is the registry's instruction to act on,
// not an ownership mutation.
async fn set_transfer_status(
    app_state: &Arc<AppState>,
    transfer_id: Uuid,
    status: TransferStatus,
) -> Result<TransferRequest, HttpError> {
    let transfer = app_state
        .db_client
        .get_transfer_request(transfer_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::TransferNotFound(transfer_id))?;

    transfer.status.ensure_transition(status)?;

    app_state
        .db_client
        .update_transfer_status(transfer_id, status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))
}

pub async fn cancel_transfer_request(
    Path(transfer_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let transfer = app_state
        .db_client
        .get_transfer_request(transfer_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::TransferNotFound(transfer_id))?;

    if transfer.requested_by != user.user.id && user.user.role != UserRole::Admin {
        return Err(HttpError::forbidden(
            "Not authorized to cancel this request".to_string(),
        ));
    }

    if transfer.status != TransferStatus::Pending {
        return Err(HttpError::bad_request(
            "Only pending transfer requests can be cancelled".to_string(),
        ));
    }

    app_state
        .db_client
        .delete_transfer_request(transfer_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Transfer request cancelled successfully"
    })))
}
