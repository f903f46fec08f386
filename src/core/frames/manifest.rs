//! 预提取帧清单
//!
//! 帧已提前抽好时的输入方式：时间戳显式写在 frames.json 里，
//! 不从 `frame_0005.jpg` 这类文件名反推。

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::frames::{ensure_ordered, FrameError, FrameSource};
use crate::models::scene::{ImageRef, SampledFrame};

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    timestamp: u64,
    path: String,
}

/// 从 frames.json 读取 (timestamp, path) 列表
pub struct ManifestSource {
    manifest_path: PathBuf,
}

impl ManifestSource {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
        }
    }
}

impl FrameSource for ManifestSource {
    fn sample(&self) -> Result<Vec<SampledFrame>, FrameError> {
        let raw = fs::read_to_string(&self.manifest_path)?;
        let base = self.manifest_path.parent().unwrap_or(Path::new("."));
        parse_manifest(&raw, base)
    }
}

/// 解析清单内容，相对路径按清单所在目录解析
pub fn parse_manifest(raw: &str, base: &Path) -> Result<Vec<SampledFrame>, FrameError> {
    let entries: Vec<ManifestEntry> = serde_json::from_str(raw)?;
    if entries.is_empty() {
        return Err(FrameError::Empty);
    }

    let frames: Vec<SampledFrame> = entries
        .into_iter()
        .map(|entry| SampledFrame {
            timestamp: entry.timestamp,
            image: ImageRef::new(base.join(&entry.path).to_string_lossy()),
        })
        .collect();

    ensure_ordered(&frames)?;
    Ok(frames)
}
