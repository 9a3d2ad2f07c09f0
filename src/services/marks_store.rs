//! 标记文件读写 - 业务能力层
//!
//! 只负责"读/写 marcacao.toml"能力，不关心流程

use base64::Engine as _;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult, FileError};
use crate::models::MarksFile;

/// 图片指纹：原始字节的 SHA-256，base64 编码
///
/// 标记文件记录这个指纹，换了图片就不再沿用旧标记
pub fn image_fingerprint(image: &[u8]) -> String {
    let hash = Sha256::digest(image);
    format!(
        "SHA256:{}",
        base64::engine::general_purpose::STANDARD.encode(hash)
    )
}

/// 标记文件存储
pub struct MarksStore {
    path: String,
}

impl MarksStore {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 读取标记文件，文件不存在时返回 None
    pub async fn load(&self) -> AppResult<Option<MarksFile>> {
        if !Path::new(&self.path).exists() {
            debug!("标记文件不存在: {}", self.path);
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::file_read_failed(&self.path, e))?;

        let marks: MarksFile = toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: self.path.clone(),
            source,
        })?;

        debug!("已读取 {} 条标记: {}", marks.entries.len(), self.path);
        Ok(Some(marks))
    }

    /// 写入标记文件（覆盖）
    pub async fn save(&self, marks: &MarksFile) -> AppResult<()> {
        let content = toml::to_string_pretty(marks).map_err(FileError::from)?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| AppError::file_write_failed(&self.path, e))?;
        debug!("已写入 {} 条标记: {}", marks.entries.len(), self.path);
        Ok(())
    }
}
