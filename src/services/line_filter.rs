//! 姓名行过滤 - 业务能力层
//!
//! 只负责"从 OCR 文本中挑出像姓名的行"，不关心去重和后续流程

use crate::models::CandidateName;

/// 表头标记，包含它们的行不是姓名
const HEADER_MARKERS: [&str; 2] = ["NOME", "PRODUTIVO"];

/// 姓名行至少要超过的字符数
const MIN_NAME_CHARS: usize = 5;

/// 惰性过滤 OCR 文本，保持原始行顺序
///
/// 纯函数：同一输入可以反复调用，结果相同
pub fn filter_candidates(raw_text: &str) -> impl Iterator<Item = CandidateName> + '_ {
    raw_text
        .lines()
        .map(str::trim)
        .filter(|line| is_candidate_line(line))
        .map(CandidateName::from)
}

/// 判断一行（已去除首尾空白）是否像姓名
///
/// 1. 字符数 > 5
/// 2. 不含小写字母（没有字母的行也算满足）
/// 3. 不含表头标记
pub fn is_candidate_line(line: &str) -> bool {
    line.chars().count() > MIN_NAME_CHARS
        && !line.chars().any(char::is_lowercase)
        && !HEADER_MARKERS.iter().any(|marker| line.contains(marker))
}
