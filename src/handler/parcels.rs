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
    db::{parceldb::ParcelExt, userdb::UserExt},
    dtos::parceldtos::{CreateParcelDto, UpdateParcelDto, UpdateParcelStatusDto},
    error::{ErrorMessage, HttpError},
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    service::{error::WorkflowError, notification_service::NotificationEvent, transition::StateTransitions},
    AppState,
};

pub fn parcels_handler() -> Router {
    Router::new()
        .route("/create", post(create_parcel))
        .route("/mine", get(get_my_parcels))
        .route(
            "/all",
            get(get_all_parcels).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/get/:parcel_id",
            get(get_parcel_by_id).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route("/update/:parcel_id", put(update_parcel))
        .route(
            "/delete/:parcel_id",
            delete(delete_parcel).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/status/:parcel_id",
            put(update_parcel_status).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

pub async fn create_parcel(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateParcelDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let parcel = app_state
        .db_client
        .save_parcel(
            user.user.id,
            body.title_deed,
            body.lr_number,
            body.location,
            body.size,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Published only after the row is committed; delivery never blocks the
    // response.
    app_state.notifier.publish(NotificationEvent::ParcelCreated {
        owner_email: user.user.email.clone(),
        owner_name: user.user.name.clone(),
        lr_number: parcel.lr_number.clone(),
        status: parcel.status.to_str().to_string(),
    });

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": {
                "parcel": parcel
            }
        })),
    ))
}

pub async fn get_all_parcels(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let parcels = app_state
        .db_client
        .get_all_parcels()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut parcel_data = Vec::new();
    for parcel in &parcels {
        let owner = app_state
            .db_client
            .get_user(Some(parcel.owner_id), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        parcel_data.push(serde_json::json!({
            "parcel": parcel,
            "owner": owner.map(|o| serde_json::json!({
                "id": o.id,
                "name": o.name,
                "email": o.email,
            })),
        }));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "parcels": parcel_data,
            "total": parcel_data.len()
        }
    })))
}

pub async fn get_my_parcels(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let parcels = app_state
        .db_client
        .get_parcels_by_owner(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "parcels": parcels,
            "total": parcels.len()
        }
    })))
}

pub async fn get_parcel_by_id(
    Path(parcel_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let parcel = app_state
        .db_client
        .get_parcel(parcel_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::ParcelNotFound(parcel_id))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "parcel": parcel
        }
    })))
}

pub async fn update_parcel(
    Path(parcel_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateParcelDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let parcel = app_state
        .db_client
        .get_parcel(parcel_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::ParcelNotFound(parcel_id))?;

    // Owners edit their own parcels; admins edit any.
    if parcel.owner_id != user.user.id && user.user.role != UserRole::Admin {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let updated = app_state
        .db_client
        .update_parcel(parcel_id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::ParcelNotFound(parcel_id))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "parcel": updated
        }
    })))
}

pub async fn delete_parcel(
    Path(parcel_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_parcel(parcel_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(WorkflowError::ParcelNotFound(parcel_id).into());
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Parcel deleted successfully"
    })))
}

pub async fn update_parcel_status(
    Path(parcel_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateParcelStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let parcel = app_state
        .db_client
        .get_parcel(parcel_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::ParcelNotFound(parcel_id))?;

    parcel.status.ensure_transition(body.status)?;

    let updated = app_state
        .db_client
        .update_parcel_status(parcel_id, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "parcel": updated
        }
    })))
}
