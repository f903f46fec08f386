//! 视频摄取管线 - 采样 → 描述 → 切分 → 导出

use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::core::caption::{CaptionError, CaptionSequenceBuilder, ImageCaptioner, TextSimilarity};
use crate::core::export::{self, ExportError};
use crate::core::frames::{FfmpegSampler, FrameError, FrameSource, ManifestSource};
use crate::core::scene::{SegmentError, Segmenter, SegmenterConfig};
use crate::models::scene::{SampledFrame, Segment};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("frame acquisition failed: {0}")]
    Frame(#[from] FrameError),
    #[error("captioning failed: {0}")]
    Caption(#[from] CaptionError),
    #[error("segmentation failed: {0}")]
    Segment(#[from] SegmentError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

/// 摄取参数
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// 采样间隔（秒）
    pub frame_interval: u64,
    /// 可选目标描述，给定时按相关度打分并过滤片段
    pub goal: Option<String>,
    pub segmenter: SegmenterConfig,
    /// metadata.json 输出路径
    pub output_json: PathBuf,
    /// 可选的 CSV 输出路径
    pub output_csv: Option<PathBuf>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            frame_interval: 5,
            goal: None,
            segmenter: SegmenterConfig::default(),
            output_json: PathBuf::from("metadata.json"),
            output_csv: None,
        }
    }
}

/// 视频摄取器 - 描述与相似度协作方由调用方注入
pub struct VideoIngestor<'a> {
    captioner: &'a dyn ImageCaptioner,
    similarity: &'a dyn TextSimilarity,
}

impl<'a> VideoIngestor<'a> {
    pub fn new(captioner: &'a dyn ImageCaptioner, similarity: &'a dyn TextSimilarity) -> Self {
        crate::init_logging();
        Self {
            captioner,
            similarity,
        }
    }

    /// 从视频文件走完整管线
    pub fn ingest_video(
        &self,
        video_path: &Path,
        frames_dir: &Path,
        config: &IngestConfig,
    ) -> Result<Vec<Segment>, IngestError> {
        info!("🎬 ingesting {}", video_path.display());
        let sampler = FfmpegSampler::new(video_path, frames_dir, config.frame_interval)?;
        let frames = sampler.sample()?;
        self.ingest_frames(frames, config)
    }

    /// 从清单列出的预提取帧走管线
    pub fn ingest_manifest(
        &self,
        manifest_path: &Path,
        config: &IngestConfig,
    ) -> Result<Vec<Segment>, IngestError> {
        info!("🎬 ingesting pre-extracted frames from {}", manifest_path.display());
        let frames = ManifestSource::new(manifest_path).sample()?;
        self.ingest_frames(frames, config)
    }

    /// 对已采样的帧执行 描述 → 切分 → 导出
    pub fn ingest_frames(
        &self,
        frames: Vec<SampledFrame>,
        config: &IngestConfig,
    ) -> Result<Vec<Segment>, IngestError> {
        let captioned = CaptionSequenceBuilder::new(self.captioner).build(&frames)?;

        let segmenter = Segmenter::with_config(self.similarity, config.segmenter.clone());
        let segments = segmenter.segment(&captioned, config.goal.as_deref())?;

        export::write_json(&segments, &config.output_json)?;
        if let Some(csv_path) = &config.output_csv {
            export::write_csv(&segments, csv_path)?;
        }

        info!(
            "✅ {} segments written to {}",
            segments.len(),
            config.output_json.display()
        );
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::caption::{MockCaptioner, MockSimilarity};
    use crate::models::scene::ImageRef;
    use std::fs;

    fn sampled(timestamp: u64, name: &str) -> SampledFrame {
        SampledFrame {
            timestamp,
            image: ImageRef::new(name),
        }
    }

    #[test]
    fn test_ingest_frames_end_to_end() {
        let captioner = MockCaptioner::with_fn(|image| {
            Ok(if image.as_str().contains("dog") {
                "dog in yard".to_string()
            } else {
                "cat on sofa".to_string()
            })
        });
        let similarity = MockSimilarity::with_table(
            vec![("cat on sofa", "dog in yard", 0.2)],
            1.0,
        );
        let ingestor = VideoIngestor::new(&captioner, &similarity);

        let dir = tempfile::tempdir().unwrap();
        let config = IngestConfig {
            output_json: dir.path().join("metadata.json"),
            output_csv: Some(dir.path().join("scene_metadata.csv")),
            ..Default::default()
        };
        let frames = vec![
            sampled(0, "cat_a.jpg"),
            sampled(5, "cat_b.jpg"),
            sampled(10, "dog_a.jpg"),
        ];

        let segments = ingestor.ingest_frames(frames, &config).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!((segments[0].start, segments[0].end), (0, 10));
        assert_eq!(segments[0].caption, "cat on sofa");

        let raw = fs::read_to_string(&config.output_json).unwrap();
        let parsed: Vec<Segment> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, segments);

        let csv = fs::read_to_string(config.output_csv.as_ref().unwrap()).unwrap();
        assert!(csv.starts_with("start,end,caption,key_frame,relevance\n"));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_ingest_manifest_end_to_end() {
        let captioner = MockCaptioner::fixed("static scene");
        let similarity = MockSimilarity::constant(1.0);
        let ingestor = VideoIngestor::new(&captioner, &similarity);

        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("frames.json");
        fs::write(
            &manifest,
            r#"[{"timestamp": 0, "path": "a.jpg"}, {"timestamp": 5, "path": "b.jpg"}]"#,
        )
        .unwrap();
        let config = IngestConfig {
            output_json: dir.path().join("metadata.json"),
            ..Default::default()
        };

        let segments = ingestor.ingest_manifest(&manifest, &config).unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!((segments[0].start, segments[0].end), (0, 5));
    }

    #[test]
    fn test_goal_filter_applies_in_pipeline() {
        let captioner = MockCaptioner::fixed("cat on sofa");
        let similarity = MockSimilarity::with_table(
            vec![("cat on sofa", "find the dog", 0.1)],
            1.0,
        );
        let ingestor = VideoIngestor::new(&captioner, &similarity);

        let dir = tempfile::tempdir().unwrap();
        let config = IngestConfig {
            goal: Some("find the dog".to_string()),
            output_json: dir.path().join("metadata.json"),
            ..Default::default()
        };
        let frames = vec![sampled(0, "a.jpg"), sampled(5, "b.jpg")];

        let segments = ingestor.ingest_frames(frames, &config).unwrap();

        assert!(segments.is_empty());
        let raw = fs::read_to_string(&config.output_json).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[test]
    fn test_captioner_failure_propagates() {
        let captioner = MockCaptioner::failing("model offline");
        let similarity = MockSimilarity::constant(1.0);
        let ingestor = VideoIngestor::new(&captioner, &similarity);

        let dir = tempfile::tempdir().unwrap();
        let config = IngestConfig {
            output_json: dir.path().join("metadata.json"),
            ..Default::default()
        };

        let result = ingestor.ingest_frames(vec![sampled(0, "a.jpg")], &config);

        assert!(matches!(result, Err(IngestError::Caption(_))));
        assert!(!config.output_json.exists());
    }
}
