use log::debug;

use crate::core::caption::TextSimilarity;
use crate::core::scene::SegmentError;
use crate::models::scene::{CaptionedFrame, Segment};

/// 切分参数
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// 当前描述与 run 代表描述的相似度低于该值视为场景边界
    pub similarity_threshold: f32,
    /// goal 过滤的相关度下限，严格大于才保留
    pub relevance_threshold: f32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.75,
            relevance_threshold: 0.5,
        }
    }
}

impl SegmenterConfig {
    /// 细切分 - 镜头切换频繁的素材
    pub fn for_fine_cuts() -> Self {
        Self {
            similarity_threshold: 0.85,
            ..Default::default()
        }
    }

    /// 粗切分 - 以静态场景为主的素材
    pub fn for_coarse_cuts() -> Self {
        Self {
            similarity_threshold: 0.6,
            ..Default::default()
        }
    }
}

/// 场景切分器
///
/// 对描述序列做单次正向扫描：每一帧与所在 run 的代表描述（首帧描述）
/// 比较，而不是与上一帧比较，场景内的缓慢漂移不会把片段切碎。
pub struct Segmenter<'a> {
    similarity: &'a dyn TextSimilarity,
    config: SegmenterConfig,
}

impl<'a> Segmenter<'a> {
    pub fn new(similarity: &'a dyn TextSimilarity) -> Self {
        Self::with_config(similarity, SegmenterConfig::default())
    }

    pub fn with_config(similarity: &'a dyn TextSimilarity, config: SegmenterConfig) -> Self {
        Self { similarity, config }
    }

    /// 将描述序列切分为场景片段
    ///
    /// 给定 goal 时，先完整构建片段列表，再按相关度过滤；
    /// 过滤永远不影响边界检测。协作方调用失败即中止，不返回部分结果。
    pub fn segment(
        &self,
        frames: &[CaptionedFrame],
        goal: Option<&str>,
    ) -> Result<Vec<Segment>, SegmentError> {
        let segments = self.build_segments(frames, goal)?;
        match goal {
            Some(_) => Ok(self.filter_by_relevance(segments)),
            None => Ok(segments),
        }
    }

    fn build_segments(
        &self,
        frames: &[CaptionedFrame],
        goal: Option<&str>,
    ) -> Result<Vec<Segment>, SegmentError> {
        let (first, rest) = frames.split_first().ok_or(SegmentError::EmptySequence)?;

        let mut segments = Vec::new();
        let mut run_caption = first.caption.as_str();
        let mut run_start = first.timestamp;
        let mut prev = first;

        for frame in rest {
            let score = self.similarity.similarity(run_caption, &frame.caption)?;
            // 边界只在严格小于阈值时触发，恰好等于视为"足够相似"
            if score < self.config.similarity_threshold {
                debug!(
                    "scene boundary at {}s (similarity {:.3} < {:.3})",
                    frame.timestamp, score, self.config.similarity_threshold
                );
                segments.push(self.close_segment(run_caption, run_start, frame.timestamp, prev, goal)?);
                run_caption = frame.caption.as_str();
                run_start = frame.timestamp;
            }
            prev = frame;
        }

        // 收尾片段无条件产出，即使整个序列没有出现过边界
        segments.push(self.close_segment(run_caption, run_start, prev.timestamp, prev, goal)?);
        Ok(segments)
    }

    fn close_segment(
        &self,
        run_caption: &str,
        start: u64,
        end: u64,
        key_frame: &CaptionedFrame,
        goal: Option<&str>,
    ) -> Result<Segment, SegmentError> {
        let relevance = match goal {
            Some(goal) => Some(self.similarity.relevance(run_caption, goal)?),
            None => None,
        };
        Ok(Segment {
            start,
            end,
            caption: run_caption.to_string(),
            key_frame: key_frame.image.clone(),
            relevance,
        })
    }

    fn filter_by_relevance(&self, segments: Vec<Segment>) -> Vec<Segment> {
        segments
            .into_iter()
            .filter(|s| {
                s.relevance
                    .map_or(false, |r| r > self.config.relevance_threshold)
            })
            .collect()
    }
}
