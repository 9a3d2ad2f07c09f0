//! 应用处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次会话的生命周期。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：检查凭据、创建 OCR 客户端（缺少凭据时拒绝启动）
//! 2. **图片接收**：只接受 png/jpg/jpeg
//! 3. **流程调度**：委托 `AttendanceFlow` 识别姓名
//! 4. **标记管理**：标记文件与图片指纹绑定，换图片或有新姓名时重写
//! 5. **报告输出**：生成报告并写入文件
//!
//! "没有文本"和"没有姓名"在这里被恢复为警告，不作为错误向上传播。

use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, FileError, PipelineError};
use crate::infrastructure::{TextRecognizer, VisionClient};
use crate::models::MarkingSheet;
use crate::services::{image_fingerprint, MarksStore};
use crate::utils::logging;
use crate::workflow::{generate_report, AttendanceFlow};

/// 允许上传的图片扩展名
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// 生成了报告
    Report {
        report: String,
        names: usize,
        /// 本次运行是否（重新）写出了标记文件
        marks_written: bool,
    },
    /// 流程在标记阶段之前停止
    Stopped(PipelineError),
}

/// 应用主结构
pub struct App<R = VisionClient> {
    config: Config,
    flow: AttendanceFlow<R>,
    marks_store: MarksStore,
}

impl App<VisionClient> {
    /// 初始化应用
    ///
    /// 没有凭据时直接失败，不会读取任何图片
    pub async fn initialize(config: Config) -> AppResult<Self> {
        logging::log_startup(&config);
        let client = VisionClient::from_config(&config)?;
        Ok(Self::with_recognizer(config, client))
    }
}

impl<R: TextRecognizer> App<R> {
    /// 使用自定义识别器创建应用
    pub fn with_recognizer(config: Config, recognizer: R) -> Self {
        let flow = AttendanceFlow::new(recognizer).with_verbose_logging(config.verbose_logging);
        let marks_store = MarksStore::new(config.marks_file.clone());
        Self {
            config,
            flow,
            marks_store,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<RunOutcome> {
        let image = self.load_image().await?;

        let mut sheet = match self.flow.start_session(&image).await {
            Ok(sheet) => sheet,
            Err(e) => {
                if let Some(stop) = e.as_informational() {
                    warn!("⚠️ {}", stop);
                    return Ok(RunOutcome::Stopped(stop));
                }
                return Err(e);
            }
        };

        let marks_written = self
            .apply_marks(&mut sheet, &image_fingerprint(&image))
            .await?;
        logging::log_marks_source(self.marks_store.path(), marks_written);

        let report = generate_report(&sheet, self.config.report_date_or_today());
        self.save_report(&report).await?;
        logging::print_report_saved(&self.config.report_file);

        Ok(RunOutcome::Report {
            report,
            names: sheet.len(),
            marks_written,
        })
    }

    /// 读取点名表图片
    async fn load_image(&self) -> AppResult<Vec<u8>> {
        let path = &self.config.image_path;

        if !is_supported_image(path) {
            return Err(FileError::UnsupportedImage { path: path.clone() }.into());
        }
        if !Path::new(path).exists() {
            return Err(FileError::NotFound { path: path.clone() }.into());
        }

        let bytes = fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path, e))?;
        info!("📷 已读取图片: {} ({} 字节)", path, bytes.len());
        Ok(bytes)
    }

    /// 应用标记文件，返回是否（重新）写出了标记文件
    ///
    /// - 文件不存在，或属于另一张图片：丢弃旧标记，按默认值写出模板
    /// - 文件属于本图片但缺少某些姓名：补上这些姓名后重写
    async fn apply_marks(&self, sheet: &mut MarkingSheet, fingerprint: &str) -> AppResult<bool> {
        let marks = match self.marks_store.load().await? {
            Some(marks) if marks.belongs_to(fingerprint) => marks,
            Some(_) => {
                warn!(
                    "⚠️ 标记文件属于另一张图片，已按默认值重新生成: {}",
                    self.marks_store.path()
                );
                self.marks_store.save(&sheet.to_marks_file(fingerprint)).await?;
                return Ok(true);
            }
            None => {
                self.marks_store.save(&sheet.to_marks_file(fingerprint)).await?;
                return Ok(true);
            }
        };

        let applied = sheet.apply(&marks);
        for name in &applied.unknown {
            warn!("标记文件中的姓名未在图片中识别到，已忽略: {}", name);
        }
        if applied.unmarked.is_empty() {
            return Ok(false);
        }

        for name in &applied.unmarked {
            warn!("⚠️ 新识别到的姓名尚未标记，已加入标记文件: {}", name);
        }
        self.marks_store.save(&sheet.to_marks_file(fingerprint)).await?;
        Ok(true)
    }

    async fn save_report(&self, report: &str) -> AppResult<()> {
        fs::write(&self.config.report_file, report)
            .await
            .map_err(|e| AppError::file_write_failed(&self.config.report_file, e))
    }
}

/// 按扩展名判断是否为支持的图片（不区分大小写）
fn is_supported_image(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
        .unwrap_or(false)
}
