use log::info;
use rayon::prelude::*;

use crate::core::caption::{CaptionError, ImageCaptioner};
use crate::models::scene::{CaptionedFrame, SampledFrame};

/// 描述序列构建器
///
/// 并行为每个采样帧生成描述。输出与输入同序（按时间戳升序），
/// 任何一帧失败即中止，不产出部分序列。
pub struct CaptionSequenceBuilder<'a> {
    captioner: &'a dyn ImageCaptioner,
    threads: usize,
}

impl<'a> CaptionSequenceBuilder<'a> {
    pub fn new(captioner: &'a dyn ImageCaptioner) -> Self {
        Self::with_threads(captioner, num_cpus::get())
    }

    pub fn with_threads(captioner: &'a dyn ImageCaptioner, threads: usize) -> Self {
        Self {
            captioner,
            threads: threads.max(1),
        }
    }

    pub fn build(&self, frames: &[SampledFrame]) -> Result<Vec<CaptionedFrame>, CaptionError> {
        info!("📝 captioning {} frames on {} threads", frames.len(), self.threads);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| CaptionError::WorkerPool(e.to_string()))?;

        pool.install(|| {
            frames
                .par_iter()
                .map(|frame| {
                    self.captioner.caption(&frame.image).map(|caption| CaptionedFrame {
                        timestamp: frame.timestamp,
                        image: frame.image.clone(),
                        caption,
                    })
                })
                .collect()
        })
    }
}
