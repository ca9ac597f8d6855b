mod composite_extractor_test;
mod docx_adapter_test;
mod plain_text_adapter_test;
