//! sceneseg - 视频场景切分 CLI
//!
//! 所有参数都是到 `api::ingest` 的直通，切分逻辑全部在库里。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use scene_lib::api::{IngestConfig, VideoIngestor};
use scene_lib::core::caption::{HttpCaptioner, HttpEmbedder};
use scene_lib::core::scene::SegmenterConfig;

/// 把视频切分为带描述的场景片段
#[derive(Parser, Debug)]
#[command(name = "sceneseg", version, about)]
struct Args {
    /// 输入视频路径
    #[arg(long, required_unless_present = "frames_manifest", conflicts_with = "frames_manifest")]
    video_path: Option<PathBuf>,

    /// 预提取帧清单 (frames.json)，代替视频输入
    #[arg(long)]
    frames_manifest: Option<PathBuf>,

    /// 目标描述，给定时按相关度过滤片段
    #[arg(long)]
    goal: Option<String>,

    /// 采样间隔（秒）
    #[arg(long, default_value_t = 5)]
    frame_interval: u64,

    /// 场景边界的相似度阈值
    #[arg(long, default_value_t = 0.75)]
    similarity_threshold: f32,

    /// goal 过滤的相关度下限（严格大于才保留）
    #[arg(long, default_value_t = 0.5)]
    relevance_threshold: f32,

    /// 图像描述服务地址
    #[arg(long, default_value = "http://127.0.0.1:8000/caption")]
    caption_url: String,

    /// 文本向量化服务地址
    #[arg(long, default_value = "http://127.0.0.1:8000/embed")]
    embedding_url: String,

    /// 采样帧落盘目录
    #[arg(long, default_value = "frames")]
    frames_dir: PathBuf,

    /// metadata.json 输出路径
    #[arg(long, default_value = "metadata.json")]
    output: PathBuf,

    /// 可选的 CSV 输出路径
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> ExitCode {
    scene_lib::init_logging();
    let args = Args::parse();

    let captioner = HttpCaptioner::new(&args.caption_url);
    let embedder = HttpEmbedder::new(&args.embedding_url);
    let ingestor = VideoIngestor::new(&captioner, &embedder);

    let config = IngestConfig {
        frame_interval: args.frame_interval,
        goal: args.goal.clone(),
        segmenter: SegmenterConfig {
            similarity_threshold: args.similarity_threshold,
            relevance_threshold: args.relevance_threshold,
        },
        output_json: args.output.clone(),
        output_csv: args.csv.clone(),
    };

    let result = match (&args.video_path, &args.frames_manifest) {
        (Some(video), _) => ingestor.ingest_video(video, &args.frames_dir, &config),
        (None, Some(manifest)) => ingestor.ingest_manifest(manifest, &config),
        // clap 已强制二选一
        (None, None) => unreachable!(),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
