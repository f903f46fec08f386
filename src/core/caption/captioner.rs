use crate::core::caption::CaptionError;
use crate::models::scene::ImageRef;

/// 图像描述协作方 - 由外部 image→text 模型实现
pub trait ImageCaptioner: Send + Sync {
    fn caption(&self, image: &ImageRef) -> Result<String, CaptionError>;
}

/// 测试用描述器
pub struct MockCaptioner {
    caption_fn: Box<dyn Fn(&ImageRef) -> Result<String, CaptionError> + Send + Sync>,
}

impl MockCaptioner {
    pub fn with_fn<F>(caption_fn: F) -> Self
    where
        F: Fn(&ImageRef) -> Result<String, CaptionError> + Send + Sync + 'static,
    {
        Self {
            caption_fn: Box::new(caption_fn),
        }
    }

    /// 每一帧都返回同一条描述
    pub fn fixed(caption: &str) -> Self {
        let caption = caption.to_string();
        Self::with_fn(move |_| Ok(caption.clone()))
    }

    /// 每次调用都失败
    pub fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::with_fn(move |_| Err(CaptionError::BadResponse(message.clone())))
    }
}

impl ImageCaptioner for MockCaptioner {
    fn caption(&self, image: &ImageRef) -> Result<String, CaptionError> {
        (self.caption_fn)(image)
    }
}
