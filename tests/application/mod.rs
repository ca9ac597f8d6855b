mod audio_transcriber_test;
mod upload_service_test;
