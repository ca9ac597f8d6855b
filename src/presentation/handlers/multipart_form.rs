use axum::extract::Multipart;

use crate::domain::{FileKind, UploadedFile};

use super::error::ApiError;

pub(super) struct UploadForm {
    pub file: UploadedFile,
    pub kind: FileKind,
    pub instruction: Option<String>,
}

/// Media types a form accepts, and the detail returned for anything else.
pub(super) struct AcceptedKinds {
    pub classify: fn(&str) -> Option<FileKind>,
    pub rejection: &'static str,
}

/// Collects the `file` part and the optional `instruction` text part.
/// The declared media type is checked against `accepted` before the part
/// body is read. Unknown parts are drained and ignored.
pub(super) async fn read_upload_form(
    mut multipart: Multipart,
    accepted: AcceptedKinds,
) -> Result<UploadForm, ApiError> {
    let mut file = None;
    let mut instruction = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let media_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                let Some(kind) = (accepted.classify)(&media_type) else {
                    tracing::warn!(
                        filename = %filename,
                        media_type = %media_type,
                        "Rejected file part by media type"
                    );
                    return Err(ApiError::UnsupportedType(accepted.rejection.to_string()));
                };

                let data = field.bytes().await?;

                tracing::debug!(
                    filename = %filename,
                    media_type = %media_type,
                    bytes = data.len(),
                    "File part received"
                );

                file = Some((UploadedFile::new(filename, media_type, data), kind));
            }
            Some("instruction") => {
                instruction = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let (file, kind) = file.ok_or_else(|| {
        tracing::warn!("Upload request with no file part");
        ApiError::BadRequest("No file uploaded".to_string())
    })?;

    Ok(UploadForm {
        file,
        kind,
        instruction,
    })
}
