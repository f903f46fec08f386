pub mod ingest;

pub use ingest::{IngestConfig, IngestError, VideoIngestor};
