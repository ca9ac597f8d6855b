pub mod audio;
pub mod llm;
pub mod observability;
pub mod text_processing;
