//! 场景切分核心

use thiserror::Error;

use crate::core::caption::CaptionError;

mod segmenter;

pub use segmenter::{Segmenter, SegmenterConfig};

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("caption sequence is empty")]
    EmptySequence,
    #[error("similarity collaborator failed: {0}")]
    Collaborator(#[from] CaptionError),
}
