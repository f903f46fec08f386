//! 通过 HTTP 访问外部推理服务的协作方实现

use std::io::Cursor;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::core::caption::embedder::cosine_similarity;
use crate::core::caption::{CaptionError, ImageCaptioner, TextSimilarity};
use crate::models::scene::ImageRef;

/// 上传前把关键帧压到的最长边
const MAX_UPLOAD_EDGE: u32 = 512;
const JPEG_QUALITY: u8 = 80;

#[derive(Debug, Deserialize)]
struct CaptionResponse {
    caption: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embeddings: Vec<Vec<f32>>,
}

/// HTTP 图像描述器
///
/// POST 重编码后的 JPEG 字节，期待 `{"caption": "..."}` 响应。
pub struct HttpCaptioner {
    client: Client,
    endpoint: String,
}

impl HttpCaptioner {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = Client::builder().build().unwrap();
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn prepare_jpeg(&self, image: &ImageRef) -> Result<Vec<u8>, CaptionError> {
        let img = image::open(image.as_str())?;
        let img = img.thumbnail(MAX_UPLOAD_EDGE, MAX_UPLOAD_EDGE);

        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, image::ImageOutputFormat::Jpeg(JPEG_QUALITY))?;
        Ok(buffer.into_inner())
    }
}

impl ImageCaptioner for HttpCaptioner {
    fn caption(&self, image: &ImageRef) -> Result<String, CaptionError> {
        let jpeg = self.prepare_jpeg(image)?;
        debug!("captioning {} ({} bytes after re-encode)", image, jpeg.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "image/jpeg")
            .body(jpeg)
            .send()?
            .error_for_status()?;

        let parsed: CaptionResponse = response.json()?;
        if parsed.caption.trim().is_empty() {
            return Err(CaptionError::BadResponse("empty caption".to_string()));
        }
        Ok(parsed.caption)
    }
}

/// HTTP 向量化器
///
/// POST `{"texts": [a, b]}`，对返回的两个向量做余弦相似度。
pub struct HttpEmbedder {
    client: Client,
    endpoint: String,
}

impl HttpEmbedder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = Client::builder().build().unwrap();
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn embed_pair(&self, a: &str, b: &str) -> Result<(Vec<f32>, Vec<f32>), CaptionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "texts": [a, b] }))
            .send()?
            .error_for_status()?;

        let parsed: EmbeddingResponse = response.json()?;
        take_pair(parsed)
    }
}

impl TextSimilarity for HttpEmbedder {
    fn similarity(&self, a: &str, b: &str) -> Result<f32, CaptionError> {
        let (ea, eb) = self.embed_pair(a, b)?;
        Ok(cosine_similarity(&ea, &eb))
    }
}

fn take_pair(parsed: EmbeddingResponse) -> Result<(Vec<f32>, Vec<f32>), CaptionError> {
    let mut vectors = parsed.embeddings.into_iter();
    match (vectors.next(), vectors.next()) {
        (Some(a), Some(b)) if !a.is_empty() && a.len() == b.len() => Ok((a, b)),
        _ => Err(CaptionError::BadResponse(
            "expected two embedding vectors of equal length".to_string(),
        )),
    }
}
