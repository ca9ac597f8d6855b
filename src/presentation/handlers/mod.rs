mod error;
mod health;
mod multipart_form;
mod process_audio;
mod summarize;
mod upload;

pub use error::{ApiError, ErrorResponse, UNSUPPORTED_AUDIO_MESSAGE, UNSUPPORTED_UPLOAD_MESSAGE};
pub use health::health_handler;
pub use process_audio::{AudioUploadResponse, process_audio_handler};
pub use summarize::summarize_handler;
pub use upload::{FileUploadResponse, upload_file_handler};
