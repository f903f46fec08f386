//! 帧获取层 - 视频采样与预提取帧清单

use thiserror::Error;

use crate::models::scene::SampledFrame;

mod ffmpeg;
mod manifest;

pub use ffmpeg::FfmpegSampler;
pub use manifest::{parse_manifest, ManifestSource};

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("ffmpeg not found in PATH")]
    FfmpegMissing,
    #[error("ffmpeg failed: {0}")]
    Ffmpeg(String),
    #[error("frame interval must be at least 1 second")]
    BadInterval,
    #[error("no frames produced")]
    Empty,
    #[error("frame timestamps must be strictly increasing (saw {prev} then {next})")]
    OutOfOrder { prev: u64, next: u64 },
}

/// 帧来源 - 产出按时间戳严格升序排列的采样帧
pub trait FrameSource {
    fn sample(&self) -> Result<Vec<SampledFrame>, FrameError>;
}

pub(crate) fn ensure_ordered(frames: &[SampledFrame]) -> Result<(), FrameError> {
    for pair in frames.windows(2) {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(FrameError::OutOfOrder {
                prev: pair[0].timestamp,
                next: pair[1].timestamp,
            });
        }
    }
    Ok(())
}
