use std::{path::Path as FsPath, sync::Arc};

use axum::{
    extract::{Multipart, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    db::{documentdb::DocumentExt, parceldb::ParcelExt, userdb::UserExt},
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::{documentmodel::DocumentType, usermodel::UserRole},
    service::error::WorkflowError,
    AppState,
};

pub fn documents_handler() -> Router {
    Router::new()
        .route("/upload", post(upload_document))
        .route("/my-documents", get(get_my_documents))
        .route(
            "/all",
            get(get_all_documents).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route("/:document_id", delete(delete_document))
}

struct UploadedFile {
    original_name: String,
    content_type: String,
    data: Vec<u8>,
}

fn is_allowed_file_type(content_type: &str) -> bool {
    content_type == "application/pdf" || content_type.starts_with("image/")
}

// Flattens the original name to <stem>_<millis>.<ext> so concurrent uploads
// of the same file never collide on disk.
fn stored_file_name(original_name: &str) -> String {
    let path = FsPath::new(original_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .replace(char::is_whitespace, "_");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("bin");
    format!("{}_{}.{}", stem, Utc::now().timestamp_millis(), ext)
}

pub async fn upload_document(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let mut name: Option<String> = None;
    let mut doc_type: Option<DocumentType> = None;
    let mut parcel_id: Option<Uuid> = None;
    let mut date_issued: Option<DateTime<Utc>> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(e.to_string()))?
    {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("name") => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| HttpError::bad_request(e.to_string()))?,
                );
            }
            Some("type") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| HttpError::bad_request(e.to_string()))?;
                doc_type = Some(DocumentType::from_str(&value).ok_or_else(|| {
                    HttpError::bad_request(format!("Invalid document type: {}", value))
                })?);
            }
            Some("parcelId") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| HttpError::bad_request(e.to_string()))?;
                parcel_id = Some(
                    Uuid::parse_str(&value)
                        .map_err(|_| HttpError::bad_request("Invalid parcel id".to_string()))?,
                );
            }
            Some("dateIssued") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| HttpError::bad_request(e.to_string()))?;
                let parsed = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|_| {
                        HttpError::bad_request("dateIssued must be YYYY-MM-DD".to_string())
                    })?
                    .and_hms_opt(0, 0, 0)
                    .ok_or_else(|| HttpError::bad_request("Invalid dateIssued".to_string()))?
                    .and_utc();
                date_issued = Some(parsed);
            }
            Some("file") => {
                let original_name = field.file_name().unwrap_or("document").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| HttpError::bad_request(e.to_string()))?;

                file = Some(UploadedFile {
                    original_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| HttpError::bad_request("Document name is required"))?;
    let doc_type = doc_type.ok_or_else(|| HttpError::bad_request("Document type is required"))?;
    let parcel_id = parcel_id.ok_or_else(|| HttpError::bad_request("Parcel ID is required"))?;
    let file = file.ok_or_else(|| HttpError::bad_request("File is required"))?;

    if !is_allowed_file_type(&file.content_type) {
        return Err(HttpError::bad_request(
            "Only images and PDFs are allowed".to_string(),
        ));
    }

    let parcel = app_state
        .db_client
        .get_parcel(parcel_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(WorkflowError::ParcelNotFound(parcel_id))?;

    let stored_name = stored_file_name(&file.original_name);
    let disk_path = FsPath::new(&app_state.env.upload_dir).join(&stored_name);

    tokio::fs::write(&disk_path, &file.data)
        .await
        .map_err(|e| HttpError::server_error(format!("Failed to store file: {}", e)))?;

    let document = app_state
        .db_client
        .save_document(
            name,
            doc_type,
            parcel.id,
            date_issued.unwrap_or_else(Utc::now),
            format!("/uploads/{}", stored_name),
            user.user.id,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "message": "Document uploaded successfully",
            "data": {
                "document": document
            }
        })),
    ))
}

pub async fn get_my_documents(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let documents = app_state
        .db_client
        .get_documents_by_uploader(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut document_data = Vec::new();
    for document in &documents {
        let parcel = app_state
            .db_client
            .get_parcel(document.parcel_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        document_data.push(serde_json::json!({
            "document": document,
            "parcelLR": parcel.map(|p| p.lr_number).unwrap_or_else(|| "N/A".to_string()),
        }));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "documents": document_data,
            "total": document_data.len()
        }
    })))
}

pub async fn get_all_documents(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let documents = app_state
        .db_client
        .get_all_documents()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut document_data = Vec::new();
    for document in &documents {
        let parcel = app_state
            .db_client
            .get_parcel(document.parcel_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        let parcel_owner = match &parcel {
            Some(p) => app_state
                .db_client
                .get_user(Some(p.owner_id), None)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?,
            None => None,
        };

        let uploader = app_state
            .db_client
            .get_user(Some(document.uploaded_by), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        document_data.push(serde_json::json!({
            "id": document.id,
            "name": document.name,
            "type": document.doc_type.to_str(),
            "fileUrl": document.file_url,
            "dateIssued": document.date_issued,
            "createdAt": document.created_at,
            "parcelLR": parcel.as_ref().map(|p| p.lr_number.clone()).unwrap_or_else(|| "N/A".to_string()),
            "parcelOwner": parcel_owner.map(|o| o.name).unwrap_or_else(|| "N/A".to_string()),
            "uploader": uploader.as_ref().map(|u| u.name.clone()).unwrap_or_else(|| "Unknown".to_string()),
            "uploaderEmail": uploader.map(|u| u.email).unwrap_or_default(),
        }));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "documents": document_data,
            "total": document_data.len()
        }
    })))
}

pub async fn delete_document(
    Path(document_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let document = app_state
        .db_client
        .get_document(document_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Document not found".to_string()))?;

    if document.uploaded_by != user.user.id && user.user.role != UserRole::Admin {
        return Err(HttpError::forbidden(
            "Not authorized to delete this document".to_string(),
        ));
    }

    // Best-effort disk cleanup; the row is the source of truth.
    if let Some(file_name) = FsPath::new(&document.file_url).file_name() {
        let disk_path = FsPath::new(&app_state.env.upload_dir).join(file_name);
        if let Err(err) = tokio::fs::remove_file(&disk_path).await {
            tracing::warn!("failed to delete file from disk: {}", err);
        }
    }

    app_state
        .db_client
        .delete_document(document_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Document deleted successfully"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_and_images_are_allowed() {
        assert!(is_allowed_file_type("application/pdf"));
        assert!(is_allowed_file_type("image/png"));
        assert!(is_allowed_file_type("image/jpeg"));
        assert!(!is_allowed_file_type("application/zip"));
        assert!(!is_allowed_file_type("text/html"));
    }

    #[test]
    fn stored_name_flattens_whitespace_and_keeps_extension() {
        let stored = stored_file_name("title deed scan.pdf");
        assert!(stored.starts_with("title_deed_scan_"));
        assert!(stored.ends_with(".pdf"));
    }
}
