//! 报告生成 - 业务能力层
//!
//! 把出勤记录拼成可以直接复制到 WhatsApp 的纯文本。
//! 日期由调用方传入，本模块不读取系统时间。

use chrono::{Datelike, NaiveDate};

use crate::models::AttendanceRecord;

const TITLE_PREFIX: &str = "ABS T2";
const OVERFLOW_HEADER: &str = "PULMÕES 🫁";
const TRAILER_PREFIX: &str = "ABS REAL: ";

/// 生成报告
///
/// 结构依次为：标题、缺席块、pulmão 块、缺席总数。
/// 空块完全不输出。
pub fn format_report(date: NaiveDate, records: &[AttendanceRecord]) -> String {
    let mut report = format!(
        "{} ({:02}/{:02})\n\n",
        TITLE_PREFIX,
        date.day(),
        date.month()
    );

    let absentees: Vec<String> = records
        .iter()
        .filter(|r| r.is_absent())
        .map(absentee_line)
        .collect();

    if !absentees.is_empty() {
        report.push_str(&absentees.join("\n"));
        report.push_str("\n\n");
    }

    let overflow: Vec<String> = records
        .iter()
        .filter(|r| r.is_overflow())
        .map(|r| format!("-{}", r.name))
        .collect();

    if !overflow.is_empty() {
        report.push_str(OVERFLOW_HEADER);
        report.push('\n');
        report.push_str(&overflow.join("\n"));
        report.push_str("\n\n");
    }

    report.push_str(TRAILER_PREFIX);
    report.push_str(&absentees.len().to_string());
    report
}

/// 缺席行："-姓名"，按需追加 (JUST) 和 (ATEST)
fn absentee_line(record: &AttendanceRecord) -> String {
    let mut line = format!("-{}", record.name);
    if record.justified {
        line.push_str(" (JUST)");
    }
    if record.has_medical_note {
        line.push_str(" (ATEST)");
    }
    line
}
