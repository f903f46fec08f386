use crate::core::caption::CaptionError;

/// 文本相似度协作方 - 由外部 embedding 模型实现
///
/// 相似度范围约为 [-1, 1]，越高越相似，要求对称。
pub trait TextSimilarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> Result<f32, CaptionError>;

    /// 描述与目标之间的相关度
    ///
    /// 默认复用同一个相似度模型，实现方可以覆盖。
    fn relevance(&self, caption: &str, goal: &str) -> Result<f32, CaptionError> {
        self.similarity(caption, goal)
    }
}

/// 余弦相似度，任一向量为零向量时返回 0
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// 测试用相似度
pub struct MockSimilarity {
    score_fn: Box<dyn Fn(&str, &str) -> f32 + Send + Sync>,
}

impl MockSimilarity {
    pub fn with_fn<F>(score_fn: F) -> Self
    where
        F: Fn(&str, &str) -> f32 + Send + Sync + 'static,
    {
        Self {
            score_fn: Box::new(score_fn),
        }
    }

    /// 所有文本对返回同一个分数
    pub fn constant(score: f32) -> Self {
        Self::with_fn(move |_, _| score)
    }

    /// 按对称的打分表查询，查不到的对返回 default
    pub fn with_table(pairs: Vec<(&str, &str, f32)>, default: f32) -> Self {
        let table: Vec<(String, String, f32)> = pairs
            .into_iter()
            .map(|(a, b, score)| (a.to_string(), b.to_string(), score))
            .collect();
        Self::with_fn(move |a, b| {
            table
                .iter()
                .find(|(x, y, _)| (x == a && y == b) || (x == b && y == a))
                .map(|(_, _, score)| *score)
                .unwrap_or(default)
        })
    }
}

impl TextSimilarity for MockSimilarity {
    fn similarity(&self, a: &str, b: &str) -> Result<f32, CaptionError> {
        Ok((self.score_fn)(a, b))
    }
}
