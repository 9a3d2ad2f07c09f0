//! 姓名去重 - 业务能力层

use std::collections::HashSet;

use crate::models::CandidateName;

/// 去掉重复姓名，只保留第一次出现的位置
///
/// 精确字符串比较（区分大小写，不再额外 trim）
pub fn dedup_names<I>(names: I) -> Vec<CandidateName>
where
    I: IntoIterator<Item = CandidateName>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
