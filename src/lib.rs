//! # Attendance Report
//!
//! 从点名表照片中识别姓名，由操作员标记出勤状态，生成可直接分享的文字报告
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源（HTTP 客户端），只暴露能力
//! - `TextRecognizer` - 文字识别能力：图片字节 → 文本
//! - `VisionClient` - 基于 Google Cloud Vision 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯逻辑，不做 I/O（标记文件读写除外）
//! - `line_filter` - 挑出像姓名的行
//! - `name_dedup` - 姓名去重
//! - `report_formatter` - 报告拼接
//! - `MarksStore` - 读写 marcacao.toml
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一张点名表"的完整处理流程
//! - `AttendanceFlow` - 识别 → 过滤 → 去重 → 标记表 → 报告
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 会话生命周期、标记模板、报告输出
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, PipelineError};
pub use infrastructure::{Credentials, TextRecognizer, VisionClient};
pub use models::{AttendanceFlags, AttendanceRecord, AttendanceStatus, CandidateName, MarkingSheet};
pub use orchestrator::{App, RunOutcome};
pub use workflow::{generate_report, AttendanceFlow};
