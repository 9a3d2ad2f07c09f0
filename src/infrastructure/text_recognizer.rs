use async_trait::async_trait;

use crate::error::RecognitionError;

/// 文字识别能力
///
/// 输入图片字节，返回识别出的全部文本；图片中没有文字时返回 `None`。
/// 纯逻辑部分（过滤、去重、报告）只依赖这个 trait，测试时不需要网络。
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> Result<Option<String>, RecognitionError>;
}
