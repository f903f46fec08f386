use serde::{Deserialize, Serialize};

/// 图像引用 - 不透明的定位符，核心逻辑不解析其内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 采样帧 - 帧提取层产出的 (时间戳, 图像引用) 对
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledFrame {
    /// 距视频起点的秒数
    pub timestamp: u64,
    pub image: ImageRef,
}

/// 已生成描述的帧，描述序列的元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionedFrame {
    pub timestamp: u64,
    pub image: ImageRef,
    pub caption: String,
}

/// 场景片段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: u64,
    pub end: u64,
    /// 该片段首帧的描述（代表描述，非摘要）
    pub caption: String,
    /// 关闭该片段的那一帧的图像引用
    pub key_frame: ImageRef,
    /// 与目标描述的相关度，仅在指定 goal 时存在
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_ref_serializes_as_plain_string() {
        let image = ImageRef::new("frames/frame_00003.jpg");
        let json = serde_json::to_string(&image).unwrap();
        assert_eq!(json, "\"frames/frame_00003.jpg\"");
    }

    #[test]
    fn test_relevance_key_omitted_when_absent() {
        let segment = Segment {
            start: 0,
            end: 10,
            caption: "cat on sofa".to_string(),
            key_frame: ImageRef::new("frames/frame_00001.jpg"),
            relevance: None,
        };
        let json = serde_json::to_string(&segment).unwrap();
        assert!(!json.contains("relevance"));

        let scored = Segment {
            relevance: Some(0.8),
            ..segment
        };
        let json = serde_json::to_string(&scored).unwrap();
        assert!(json.contains("\"relevance\":0.8"));
    }
}
