//! 描述与相似度协作方 - 外部模型的注入点

use thiserror::Error;

mod builder;
mod captioner;
mod embedder;
mod http;

pub use builder::CaptionSequenceBuilder;
pub use captioner::{ImageCaptioner, MockCaptioner};
pub use embedder::{cosine_similarity, MockSimilarity, TextSimilarity};
pub use http::{HttpCaptioner, HttpEmbedder};

#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed collaborator response: {0}")]
    BadResponse(String),
    #[error("caption worker pool: {0}")]
    WorkerPool(String),
}
