use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 流程中断（无文本、无候选姓名、缺少凭据）
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    /// 文字识别服务错误
    #[error("识别错误: {0}")]
    Recognition(#[from] RecognitionError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 流程错误
///
/// 只对当前操作是致命的，不会导致进程崩溃。
/// Display 文本直接展示给操作员，所以使用葡萄牙语。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// OCR 没有返回任何文本
    #[error("Nenhum texto detectado.")]
    NoTextDetected,
    /// 有文本，但没有任何一行通过姓名过滤
    #[error("Nenhum nome detectado na imagem.")]
    NoCandidatesAfterFilter,
    /// 没有配置 OCR 服务凭据
    #[error("Credenciais não encontradas.")]
    MissingCredentials,
}

impl PipelineError {
    /// 是否只是提示性的警告（流程在标记阶段之前停止）
    pub fn is_informational(self) -> bool {
        matches!(
            self,
            PipelineError::NoTextDetected | PipelineError::NoCandidatesAfterFilter
        )
    }
}

/// 文字识别服务错误
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// 网络请求失败
    #[error("请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// HTTP 状态码不是 2xx
    #[error("服务返回错误响应: status={status}, body={body}")]
    BadResponse { status: u16, body: String },
    /// 服务在响应体中报告的错误
    #[error("服务报告错误: code={code}, message={message}")]
    Service { code: i64, message: String },
    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// TOML 序列化失败
    #[error("TOML序列化失败: {0}")]
    TomlSerializeFailed(#[from] toml::ser::Error),
    /// 不支持的图片格式
    #[error("不支持的图片格式 (仅支持 png/jpg/jpeg): {path}")]
    UnsupportedImage { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 日期格式无效
    #[error("环境变量 {var_name} 的日期 '{value}' 无效，应为 YYYY-MM-DD")]
    InvalidDate { var_name: String, value: String },
    /// HTTP 客户端构建失败
    #[error("HTTP 客户端构建失败: {0}")]
    HttpClient(#[source] reqwest::Error),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 如果是提示性的流程错误，返回它
    pub fn as_informational(&self) -> Option<PipelineError> {
        match self {
            AppError::Pipeline(e) if e.is_informational() => Some(*e),
            _ => None,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
