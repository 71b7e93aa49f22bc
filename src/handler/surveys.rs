use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{parceldb::ParcelExt, surveydb::SurveyExt, userdb::UserExt},
    dtos::surveydtos::{AssignSurveyorDto, CreateSurveyorDto, SubmitFeedbackDto, SurveyorLoginDto},
    error::{ErrorMessage, HttpError},
    middleware::{role_check, JWTAuthMiddeware},
    models::{surveymodel::SurveyStatus, usermodel::UserRole},
    service::{error::WorkflowError, notification_service::NotificationEvent, transition::StateTransitions},
    utils::{password, token},
    AppState,
};

// Login and logout are mounted without the auth middleware.
pub fn surveyor_auth_handler() -> Router {
    Router::new()
        .route("/login", post(login_surveyor))
        .route("/logout", get(logout_surveyor))
}

pub fn surveys_handler() -> Router {
    Router::new()
        .route(
            "/assign/:parcel_id",
            post(assign_surveyor).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/my-surveys",
            get(get_my_surveys).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Surveyor])
            })),
        )
        .route(
            "/:survey_id/feedback",
            put(submit_feedback).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Surveyor])
            })),
        )
        .route(
            "/all",
            get(get_all_surveys).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/parcel/:parcel_id/feedback",
            get(get_feedback_by_parcel).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/unassigned-parcels",
            get(get_unassigned_parcels).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/surveyors",
            get(get_all_surveyors).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/create-surveyor",
            post(create_surveyor).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

pub async fn login_surveyor(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SurveyorLoginDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, Some(&body.email))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    if user.role != UserRole::Surveyor {
        return Err(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    if !user.account_verified {
        return Err(HttpError::forbidden(
            ErrorMessage::AccountNotVerified.to_string(),
        ));
    }

    let password_matched = password::compare(&body.password, &user.password)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !password_matched {
        return Err(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage * 60,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(time::Duration::minutes(app_state.env.jwt_maxage))
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Failed to build cookie header".to_string()))?,
    );

    let mut response = Json(serde_json::json!({
        "status": "success",
        "message": "Login successful",
        "token": token,
        "surveyor": {
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "role": user.role,
        }
    }))
    .into_response();

    response.headers_mut().extend(headers);
    Ok(response)
}

pub async fn logout_surveyor() -> Result<impl IntoResponse, HttpError> {
    let cookie = Cookie::build(("token", ""))
        .path("/")
        .max_age(time::Duration::minutes(-1))
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Failed to build cookie header".to_string()))?,
    );

    let mut response = Json(serde_json::json!({
        "status": "success",
        "message": "Logout successful"
    }))
    .into_response();

    response.headers_mut().extend(headers);
    Ok(response)
}

pub async fn assign_surveyor(
    Path(parcel_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<AssignSurveyorDto>,
) -> Result<impl IntoResponse, HttpError> {
    let parcel = app_state
        .db_client
        .get_parcel(parcel_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::ParcelNotFound(parcel_id))?;

    let surveyor = app_state
        .db_client
        .get_user(Some(body.surveyor_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::bad_request("Invalid surveyor".to_string()))?;

    if surveyor.role != UserRole::Surveyor {
        return Err(HttpError::bad_request("Invalid surveyor".to_string()));
    }

    // One survey per parcel.
    if let Some(_existing) = app_state
        .db_client
        .get_survey_by_parcel(parcel_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
    {
        return Err(WorkflowError::SurveyAlreadyAssigned(parcel_id).into());
    }

    let survey = match app_state
        .db_client
        .save_survey(parcel_id, surveyor.id, parcel.owner_id)
        .await
    {
        Ok(survey) => survey,
        // Unique index backs the check above against concurrent assigns.
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(WorkflowError::SurveyAlreadyAssigned(parcel_id).into());
        }
        Err(e) => return Err(HttpError::server_error(e.to_string())),
    };

    let owner = app_state
        .db_client
        .get_user(Some(parcel.owner_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::server_error("Parcel owner not found".to_string()))?;

    app_state
        .notifier
        .publish(NotificationEvent::SurveyorAssigned {
            owner_email: owner.email,
            owner_name: owner.name,
            lr_number: parcel.lr_number.clone(),
            surveyor_name: surveyor.name,
        });

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "message": format!("Surveyor assigned to parcel {}", parcel.lr_number),
            "data": {
                "survey": survey
            }
        })),
    ))
}

pub async fn get_my_surveys(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let surveys = app_state
        .db_client
        .get_surveys_by_surveyor(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut survey_data = Vec::new();
    for survey in &surveys {
        let parcel = app_state
            .db_client
            .get_parcel(survey.parcel_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        let owner = app_state
            .db_client
            .get_user(Some(survey.owner_id), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        survey_data.push(serde_json::json!({
            "id": survey.id,
            "status": survey.status,
            "feedback": survey.feedback,
            "assignedAt": survey.assigned_at,
            "parcel": parcel.map(|p| serde_json::json!({
                "id": p.id,
                "lrNumber": p.lr_number,
                "location": p.location,
                "status": p.status,
                "owner": owner.map(|o| serde_json::json!({
                    "name": o.name,
                    "email": o.email,
                })),
            })),
        }));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "surveys": survey_data,
            "total": survey_data.len()
        }
    })))
}

pub async fn submit_feedback(
    Path(survey_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<SubmitFeedbackDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let survey = app_state
        .db_client
        .get_survey(survey_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::SurveyNotFound(survey_id))?;

    if survey.surveyor_id != user.user.id {
        return Err(WorkflowError::UnauthorizedAccess(user.user.id, "survey").into());
    }

    // Completed is terminal; feedback cannot be overwritten.
    if survey.status == SurveyStatus::Completed {
        return Err(WorkflowError::SurveyAlreadyCompleted(survey_id).into());
    }

    survey.status.ensure_transition(SurveyStatus::Completed)?;

    let updated = app_state
        .db_client
        .complete_survey(survey_id, &body.feedback)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Feedback submitted",
        "data": {
            "survey": updated
        }
    })))
}

pub async fn get_all_surveys(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let surveys = app_state
        .db_client
        .get_all_surveys()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut survey_data = Vec::new();
    for survey in &surveys {
        let parcel = app_state
            .db_client
            .get_parcel(survey.parcel_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        let surveyor = app_state
            .db_client
            .get_user(Some(survey.surveyor_id), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        let owner = app_state
            .db_client
            .get_user(Some(survey.owner_id), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        survey_data.push(serde_json::json!({
            "survey": survey,
            "parcel": parcel.map(|p| serde_json::json!({
                "lrNumber": p.lr_number,
                "location": p.location,
                "titleDeed": p.title_deed,
                "status": p.status,
            })),
            "surveyor": surveyor.map(|s| serde_json::json!({
                "name": s.name,
                "email": s.email,
            })),
            "owner": owner.map(|o| serde_json::json!({
                "name": o.name,
                "email": o.email,
            })),
        }));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "surveys": survey_data,
            "total": survey_data.len()
        }
    })))
}

pub async fn get_feedback_by_parcel(
    Path(parcel_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let survey = app_state
        .db_client
        .get_survey_by_parcel(parcel_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("No survey found for this parcel".to_string()))?;

    if survey.feedback.is_none() {
        return Ok(Json(serde_json::json!({
            "status": "success",
            "message": "No feedback available for this parcel yet",
            "feedback": serde_json::Value::Null,
        })));
    }

    let surveyor = app_state
        .db_client
        .get_user(Some(survey.surveyor_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let parcel = app_state
        .db_client
        .get_parcel(parcel_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "feedback": {
            "status": survey.status,
            "comments": survey.feedback,
            "completedAt": survey.completed_at,
            "surveyor": surveyor.map(|s| serde_json::json!({
                "name": s.name,
                "email": s.email,
            })),
            "parcel": parcel.map(|p| serde_json::json!({
                "lrNumber": p.lr_number,
                "location": p.location,
            })),
        }
    })))
}

pub async fn get_unassigned_parcels(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let parcels = app_state
        .db_client
        .get_unassigned_parcels()
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

pub async fn get_all_surveyors(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let surveyors = app_state
        .db_client
        .get_users_by_role(UserRole::Surveyor)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let surveyor_data: Vec<serde_json::Value> = surveyors
        .iter()
        .map(|s| {
            serde_json::json!({
                "id": s.id,
                "name": s.name,
                "email": s.email,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "surveyors": surveyor_data
        }
    })))
}

pub async fn create_surveyor(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateSurveyorDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let hashed_password =
        password::hash(&body.password).map_err(|e| HttpError::server_error(e.to_string()))?;

    // Surveyor accounts are admin-created and verified on the spot.
    let result = app_state
        .db_client
        .save_user(
            body.name,
            body.email,
            hashed_password,
            UserRole::Surveyor,
            true,
        )
        .await;

    match result {
        Ok(surveyor) => Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({
                "status": "success",
                "message": "Surveyor account created successfully",
                "data": {
                    "surveyor": {
                        "id": surveyor.id,
                        "name": surveyor.name,
                        "email": surveyor.email,
                        "role": surveyor.role,
                    }
                }
            })),
        )),
        Err(sqlx::Error::Database(db_err)) => {
            if db_err.is_unique_violation() {
                Err(HttpError::bad_request(ErrorMessage::EmailExist.to_string()))
            } else {
                Err(HttpError::server_error(db_err.to_string()))
            }
        }
        Err(e) => Err(HttpError::server_error(e.to_string())),
    }
}
