pub mod export_service;
pub mod ingest_service;
pub mod report_service;
pub mod sources;
