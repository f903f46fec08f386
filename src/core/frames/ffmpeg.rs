//! 基于 ffmpeg 子进程的帧采样

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use crate::core::frames::{FrameError, FrameSource};
use crate::models::scene::{ImageRef, SampledFrame};

/// 固定间隔从视频采样 JPEG 帧
///
/// 时间戳 = 帧序号 × 采样间隔，随帧结构化传递，不从文件名反推。
pub struct FfmpegSampler {
    ffmpeg_path: String,
    video_path: PathBuf,
    output_dir: PathBuf,
    interval_sec: u64,
}

impl FfmpegSampler {
    pub fn new(
        video_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        interval_sec: u64,
    ) -> Result<Self, FrameError> {
        if interval_sec == 0 {
            return Err(FrameError::BadInterval);
        }
        let ffmpeg_path = which_ffmpeg()?;
        Ok(Self {
            ffmpeg_path,
            video_path: video_path.into(),
            output_dir: output_dir.into(),
            interval_sec,
        })
    }
}

impl FrameSource for FfmpegSampler {
    fn sample(&self) -> Result<Vec<SampledFrame>, FrameError> {
        fs::create_dir_all(&self.output_dir)?;
        let pattern = self.output_dir.join("frame_%05d.jpg");

        info!(
            "🎞 sampling {} every {}s",
            self.video_path.display(),
            self.interval_sec
        );
        let output = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(&self.video_path)
            .args([
                "-vf",
                &format!("fps=1/{}", self.interval_sec),
                "-q:v",
                "3",
                "-y",
            ])
            .arg(&pattern)
            .output()?;

        if !output.status.success() {
            return Err(FrameError::Ffmpeg(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let produced = collect_frame_files(&self.output_dir)?;
        if produced.is_empty() {
            return Err(FrameError::Empty);
        }

        Ok(assign_timestamps(produced, self.interval_sec))
    }
}

/// 按输出顺序给采样帧配时间戳
fn assign_timestamps(paths: Vec<PathBuf>, interval_sec: u64) -> Vec<SampledFrame> {
    paths
        .into_iter()
        .enumerate()
        .map(|(index, path)| SampledFrame {
            timestamp: index as u64 * interval_sec,
            image: ImageRef::new(path.to_string_lossy()),
        })
        .collect()
}

fn collect_frame_files(dir: &Path) -> Result<Vec<PathBuf>, FrameError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with("frame_") && name.ends_with(".jpg") {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}

fn which_ffmpeg() -> Result<String, FrameError> {
    let output = Command::new("which").arg("ffmpeg").output()?;
    if !output.status.success() {
        return Err(FrameError::FfmpegMissing);
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_rejected() {
        let result = FfmpegSampler::new("video.mp4", "frames", 0);
        assert!(matches!(result, Err(FrameError::BadInterval)));
    }

    #[test]
    fn test_timestamps_follow_sampling_cadence() {
        let paths = vec![
            PathBuf::from("frames/frame_00001.jpg"),
            PathBuf::from("frames/frame_00002.jpg"),
            PathBuf::from("frames/frame_00003.jpg"),
        ];

        let frames = assign_timestamps(paths, 5);

        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].timestamp, 0);
        assert_eq!(frames[1].timestamp, 5);
        assert_eq!(frames[2].timestamp, 10);
        assert_eq!(frames[0].image, ImageRef::new("frames/frame_00001.jpg"));
    }

    #[test]
    fn test_collect_frame_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["frame_00002.jpg", "frame_00001.jpg", "notes.txt", "cover.png"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let paths = collect_frame_files(dir.path()).unwrap();

        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["frame_00001.jpg", "frame_00002.jpg"]);
    }
}
