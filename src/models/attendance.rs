//! 点名数据模型
//!
//! 候选姓名、出勤状态、操作员标记以及由它们组合出的出勤记录

use std::fmt::Display;

/// 通过过滤规则的一行 OCR 文本
///
/// 除文本本身外没有其他身份信息
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateName(String);

impl CandidateName {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for CandidateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateName {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// 出勤状态，每条记录恰好一个
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendanceStatus {
    /// 出席
    Present,
    /// 缺席
    Absent,
    /// 暂时搁置（"pulmão"），单独列在报告中
    Overflow,
}

impl AttendanceStatus {
    /// 按优先级从四个标记中决定状态：pulmão > 未勾选出席 > 出席
    pub fn from_flags(present: bool, overflow: bool) -> Self {
        if overflow {
            AttendanceStatus::Overflow
        } else if !present {
            AttendanceStatus::Absent
        } else {
            AttendanceStatus::Present
        }
    }
}

/// 操作员为一个姓名设置的四个独立开关
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceFlags {
    pub present: bool,
    pub justified: bool,
    pub medical_note: bool,
    pub overflow: bool,
}

impl Default for AttendanceFlags {
    fn default() -> Self {
        Self {
            present: true,
            justified: false,
            medical_note: false,
            overflow: false,
        }
    }
}

/// 出勤记录
///
/// `justified` / `has_medical_note` 只在缺席时有意义，但无论状态如何都原样保留
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub name: String,
    pub status: AttendanceStatus,
    pub justified: bool,
    pub has_medical_note: bool,
}

impl AttendanceRecord {
    /// 由姓名和当前标记构建记录，不做校验，也不会失败
    pub fn build(name: &CandidateName, flags: AttendanceFlags) -> Self {
        Self {
            name: name.as_str().to_string(),
            status: AttendanceStatus::from_flags(flags.present, flags.overflow),
            justified: flags.justified,
            has_medical_note: flags.medical_note,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.status == AttendanceStatus::Absent
    }

    pub fn is_overflow(&self) -> bool {
        self.status == AttendanceStatus::Overflow
    }
}
