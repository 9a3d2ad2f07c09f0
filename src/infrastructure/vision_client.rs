//! Google Cloud Vision 客户端
//!
//! 封装 `images:annotate` 的 TEXT_DETECTION 调用，只调用一次，不重试

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ConfigError, PipelineError, RecognitionError};
use crate::infrastructure::text_recognizer::TextRecognizer;

/// Vision API 凭据
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// 作为 `?key=` 查询参数
    ApiKey(String),
    /// OAuth 访问令牌，作为 Bearer 头
    AccessToken(String),
}

/// Vision 客户端
pub struct VisionClient {
    client: Client,
    endpoint: String,
    credentials: Credentials,
}

impl VisionClient {
    pub fn new(
        endpoint: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            credentials,
        })
    }

    /// 从配置创建客户端，缺少凭据时直接拒绝
    pub fn from_config(config: &Config) -> crate::error::AppResult<Self> {
        let credentials = config.credentials().map_err(|e: PipelineError| {
            warn!("未配置 VISION_API_KEY 或 VISION_ACCESS_TOKEN");
            e
        })?;

        Ok(Self::new(
            config.vision_endpoint.clone(),
            credentials,
            Duration::from_secs(config.request_timeout_secs),
        )?)
    }
}

#[async_trait]
impl TextRecognizer for VisionClient {
    async fn recognize(&self, image: &[u8]) -> Result<Option<String>, RecognitionError> {
        debug!("正在调用 Vision API，图片大小: {} 字节", image.len());

        let body = build_request_body(image);
        let mut request = self.client.post(&self.endpoint).json(&body);
        request = match &self.credentials {
            Credentials::ApiKey(key) => request.query(&[("key", key)]),
            Credentials::AccessToken(token) => request.bearer_auth(token),
        };

        let response = request
            .send()
            .await
            .map_err(|source| RecognitionError::RequestFailed {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| RecognitionError::RequestFailed {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        if !status.is_success() {
            warn!("Vision API 返回 {}", status);
            return Err(RecognitionError::BadResponse {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!("Vision API 调用成功");
        parse_annotate_response(&text)
    }
}

/// 构建 TEXT_DETECTION 请求体
fn build_request_body(image: &[u8]) -> serde_json::Value {
    let content = base64::engine::general_purpose::STANDARD.encode(image);
    json!({
        "requests": [{
            "image": { "content": content },
            "features": [{ "type": "TEXT_DETECTION" }]
        }]
    })
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    text_annotations: Vec<EntityAnnotation>,
    error: Option<ServiceStatus>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ServiceStatus {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// 解析 annotate 响应
///
/// 第一条 textAnnotation 是整张图片的聚合文本
fn parse_annotate_response(body: &str) -> Result<Option<String>, RecognitionError> {
    let parsed: AnnotateResponse = serde_json::from_str(body)?;

    let Some(first) = parsed.responses.into_iter().next() else {
        return Ok(None);
    };

    if let Some(status) = first.error {
        return Err(RecognitionError::Service {
            code: status.code,
            message: status.message,
        });
    }

    Ok(first
        .text_annotations
        .into_iter()
        .next()
        .map(|a| a.description)
        .filter(|text| !text.is_empty()))
}
