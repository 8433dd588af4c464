//! Image upload handler.

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::MAX_UPLOAD_BODY_BYTES;

use crate::api::state::AppState;
use crate::service::UploadedFile;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = "https://hr-files.s3.ap-southeast-1.amazonaws.com/1700000000-avatar.png")]
    pub uri: String,
}

/// Multipart body accepted by `POST /v1/file`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// jpg, jpeg or png, at most 100 KiB
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Bodies past the upload limit are cut off while streaming.
pub fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(upload_file))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::field("file", "File must not exceed 100 KiB");
    }
    AppError::bad_request(e.body_text())
}

/// Upload an image to public object storage
#[utoipa::path(
    post,
    path = "/v1/file",
    tag = "Files",
    security(("bearer_auth" = [])),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing file, bad extension or too large"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 502, description = "Object storage failed")
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?.to_vec();

        upload = Some(UploadedFile {
            file_name,
            content_type,
            data,
        });
        break;
    }

    let file = upload.ok_or_else(|| AppError::field("file", "File is required"))?;
    let uri = state.files.upload(file).await?;

    Ok(Json(UploadResponse { uri }))
}
