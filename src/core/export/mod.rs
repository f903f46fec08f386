//! 导出层 - metadata.json 与 scene_metadata.csv
//!
//! 在借用的片段列表上运行，导出失败不会破坏已算出的切分结果。

use std::fs;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::models::scene::Segment;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn to_json(segments: &[Segment]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(segments)?)
}

pub fn write_json(segments: &[Segment], path: &Path) -> Result<(), ExportError> {
    let body = to_json(segments)?;
    fs::write(path, body)?;
    info!("✔ saved {} segments to {}", segments.len(), path.display());
    Ok(())
}

pub fn to_csv(segments: &[Segment]) -> String {
    let mut out = String::from("start,end,caption,key_frame,relevance\n");
    for segment in segments {
        let relevance = segment
            .relevance
            .map(|r| r.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            segment.start,
            segment.end,
            csv_field(&segment.caption),
            csv_field(segment.key_frame.as_str()),
            relevance
        ));
    }
    out
}

pub fn write_csv(segments: &[Segment], path: &Path) -> Result<(), ExportError> {
    fs::write(path, to_csv(segments))?;
    info!("📄 saved scene metadata to {}", path.display());
    Ok(())
}

/// 含逗号、引号或换行的字段加引号转义
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
