//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次会话的调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (一次会话：图片 → 报告)
//!     ↓
//! workflow::AttendanceFlow (识别 → 过滤 → 去重 → 标记表 → 报告)
//!     ↓
//! services (能力层：filter / dedup / report / marks)
//!     ↓
//! infrastructure (基础设施：TextRecognizer / VisionClient)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有 OCR 客户端和文件路径
//! 2. **向下依赖**：编排层 → workflow → services → infrastructure
//! 3. **无业务逻辑**：只做调度和输出，不做姓名判断

pub mod app;

pub use app::{App, RunOutcome};
