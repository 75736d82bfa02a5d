//! Image upload handler.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::AppState;

type UploadFailure = (StatusCode, Json<serde_json::Value>);

/// Accept one uploaded file and persist it under the public uploads
/// directory.
///
/// # Multipart Fields
/// - `file`: the image file (required)
///
/// # Returns
/// - 200 OK `{success: true, path}` with the stored file's public path
/// - 400 Bad Request `{success: false, message}` when no file is present
/// - 500 Internal Server Error `{success: false, message}` on I/O failure
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, UploadFailure> {
    let mut file_name: Option<String> = None;
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        failure(
            StatusCode::BAD_REQUEST,
            format!("Multipart error: {}", e),
        )
    })? {
        let field_name = field.name().map(|n| n.to_string());
        if field_name.as_deref() == Some("file") {
            file_name = field.file_name().map(|n| n.to_string());
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        failure(StatusCode::BAD_REQUEST, format!("Read error: {}", e))
                    })?
                    .to_vec(),
            );
        }
        // ignore unknown fields
    }

    let Some(data) = file_data else {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "No file found in the request.".to_string(),
        ));
    };

    let original_name = file_name.unwrap_or_else(|| "upload".to_string());
    let path = state
        .uploads
        .store_upload(&original_name, &data)
        .await
        .map_err(|e| failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    info!(path = %path, size = data.len(), "stored upload");
    Ok(Json(serde_json::json!({
        "success": true,
        "path": path,
    })))
}

fn failure(status: StatusCode, message: String) -> UploadFailure {
    (
        status,
        Json(serde_json::json!({
            "success": false,
            "message": message,
        })),
    )
}
