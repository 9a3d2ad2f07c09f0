//! 点名处理流程 - 流程层
//!
//! 核心职责：定义"一张点名表"的完整处理流程
//!
//! 流程顺序：
//! 1. OCR 识别 → 姓名过滤 → 去重 → 标记表
//! 2. 标记表 + 日期 → 报告

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{AppResult, PipelineError};
use crate::infrastructure::TextRecognizer;
use crate::models::{CandidateName, MarkingSheet};
use crate::services::{dedup_names, filter_candidates, format_report};
use crate::utils::logging::truncate_text;

/// 点名处理流程
///
/// - 只依赖 `TextRecognizer` 能力，不关心具体 OCR 服务
/// - 不持有会话状态，标记表由调用方持有并显式传入
pub struct AttendanceFlow<R> {
    recognizer: R,
    verbose_logging: bool,
}

impl<R: TextRecognizer> AttendanceFlow<R> {
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            verbose_logging: false,
        }
    }

    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose_logging = verbose;
        self
    }

    /// 从图片中提取去重后的姓名
    ///
    /// 没有文本或没有任何候选姓名时返回对应的 `PipelineError`
    pub async fn extract_names(&self, image: &[u8]) -> AppResult<Vec<CandidateName>> {
        let raw_text = self
            .recognizer
            .recognize(image)
            .await?
            .ok_or(PipelineError::NoTextDetected)?;

        if self.verbose_logging {
            debug!("OCR 文本预览: {}", truncate_text(&raw_text, 120));
        }

        let names = names_from_text(&raw_text)?;
        info!("✓ {} nomes detectados!", names.len());
        Ok(names)
    }

    /// 识别图片并创建新的标记表（所有人默认出席）
    pub async fn start_session(&self, image: &[u8]) -> AppResult<MarkingSheet> {
        let names = self.extract_names(image).await?;
        Ok(MarkingSheet::new(names))
    }
}

/// 过滤 + 去重，纯函数
pub fn names_from_text(raw_text: &str) -> Result<Vec<CandidateName>, PipelineError> {
    let names = dedup_names(filter_candidates(raw_text));
    if names.is_empty() {
        return Err(PipelineError::NoCandidatesAfterFilter);
    }
    Ok(names)
}

/// 按标记表当前状态生成报告，每次调用都完整重算
pub fn generate_report(sheet: &MarkingSheet, date: NaiveDate) -> String {
    let records = sheet.records();
    debug!("生成报告: {} 条记录", records.len());
    format_report(date, &records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, RecognitionError};
    use crate::models::AttendanceFlags;
    use async_trait::async_trait;

    /// 返回固定文本的识别器
    struct FixedRecognizer(Option<&'static str>);

    #[async_trait]
    impl TextRecognizer for FixedRecognizer {
        async fn recognize(&self, _image: &[u8]) -> Result<Option<String>, RecognitionError> {
            Ok(self.0.map(str::to_string))
        }
    }

    /// 总是失败的识别器
    struct FailingRecognizer;

    #[async_trait]
    impl TextRecognizer for FailingRecognizer {
        async fn recognize(&self, _image: &[u8]) -> Result<Option<String>, RecognitionError> {
            Err(RecognitionError::BadResponse {
                status: 403,
                body: "PERMISSION_DENIED".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_extract_names_filters_and_dedups() {
        let flow = AttendanceFlow::new(FixedRecognizer(Some(
            "NOME\nJOAO SILVA\nMARIA SOUZA\nMARIA SOUZA\nab\nPRODUTIVO X",
        )));
        let names = flow.extract_names(b"png").await.unwrap();
        assert_eq!(
            names,
            vec![CandidateName::from("JOAO SILVA"), CandidateName::from("MARIA SOUZA")]
        );
    }

    #[tokio::test]
    async fn test_no_text_detected() {
        let flow = AttendanceFlow::new(FixedRecognizer(None));
        let err = flow.extract_names(b"png").await.unwrap_err();
        assert_eq!(err.as_informational(), Some(PipelineError::NoTextDetected));
    }

    #[tokio::test]
    async fn test_no_candidates_after_filter() {
        let flow = AttendanceFlow::new(FixedRecognizer(Some("NOME\nab\nLista de presença")));
        let err = flow.start_session(b"png").await.unwrap_err();
        assert_eq!(
            err.as_informational(),
            Some(PipelineError::NoCandidatesAfterFilter)
        );
    }

    #[tokio::test]
    async fn test_recognizer_failure_propagates() {
        let flow = AttendanceFlow::new(FailingRecognizer);
        let err = flow.extract_names(b"png").await.unwrap_err();
        assert!(matches!(err, AppError::Recognition(_)));
        assert!(err.as_informational().is_none());
    }

    #[test]
    fn test_report_recomputed_from_current_flags() {
        let mut sheet = tokio_test::block_on(
            AttendanceFlow::new(FixedRecognizer(Some("JOAO SILVA\nMARIA SOUZA"))).start_session(b""),
        )
        .unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();

        assert_eq!(generate_report(&sheet, date), "ABS T2 (03/05)\n\nABS REAL: 0");

        sheet.set_flags(
            &"JOAO SILVA".into(),
            AttendanceFlags {
                present: false,
                justified: true,
                ..AttendanceFlags::default()
            },
        );
        assert_eq!(
            generate_report(&sheet, date),
            "ABS T2 (03/05)\n\n-JOAO SILVA (JUST)\n\nABS REAL: 1"
        );
    }
}
