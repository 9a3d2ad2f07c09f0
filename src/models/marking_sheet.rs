//! 标记表
//!
//! 当前会话中"姓名 → 四个开关"的显式映射，每次上传新图片时重建

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::models::attendance::{AttendanceFlags, AttendanceRecord, CandidateName};

/// 会话持有的标记表
#[derive(Debug, Clone, Default)]
pub struct MarkingSheet {
    names: Vec<CandidateName>,
    flags: HashMap<CandidateName, AttendanceFlags>,
}

impl MarkingSheet {
    /// 用去重后的姓名创建标记表，所有人使用默认标记（出席）
    pub fn new(names: Vec<CandidateName>) -> Self {
        let flags = names
            .iter()
            .map(|name| (name.clone(), AttendanceFlags::default()))
            .collect();
        Self { names, flags }
    }

    pub fn names(&self) -> &[CandidateName] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn flags(&self, name: &CandidateName) -> Option<AttendanceFlags> {
        self.flags.get(name).copied()
    }

    /// 更新某个姓名的标记，姓名不在表中时返回 false
    pub fn set_flags(&mut self, name: &CandidateName, flags: AttendanceFlags) -> bool {
        match self.flags.get_mut(name) {
            Some(slot) => {
                *slot = flags;
                true
            }
            None => false,
        }
    }

    /// 应用标记文件
    ///
    /// 返回文件中多出来的姓名，以及本次识别到但文件里没有的姓名
    pub fn apply(&mut self, marks: &MarksFile) -> MarksApplied {
        let mut applied = MarksApplied::default();
        let mut marked = HashSet::new();
        for entry in &marks.entries {
            let name = CandidateName::new(entry.name.clone());
            if self.set_flags(&name, entry.flags()) {
                marked.insert(name);
            } else {
                applied.unknown.push(entry.name.clone());
            }
        }
        applied.unmarked = self
            .names
            .iter()
            .filter(|name| !marked.contains(*name))
            .cloned()
            .collect();
        applied
    }

    /// 按当前标记构建出勤记录，顺序与姓名顺序一致
    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.names
            .iter()
            .map(|name| {
                let flags = self.flags(name).unwrap_or_default();
                AttendanceRecord::build(name, flags)
            })
            .collect()
    }

    /// 导出为标记文件，绑定到生成它的图片
    pub fn to_marks_file(&self, image_fingerprint: impl Into<String>) -> MarksFile {
        MarksFile {
            image_fingerprint: Some(image_fingerprint.into()),
            entries: self
                .names
                .iter()
                .map(|name| MarkEntry::new(name.as_str(), self.flags(name).unwrap_or_default()))
                .collect(),
        }
    }
}

/// `MarkingSheet::apply` 的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarksApplied {
    /// 文件中有、但本次没有识别到的姓名
    pub unknown: Vec<String>,
    /// 本次识别到、但文件中没有的姓名（保持默认标记）
    pub unmarked: Vec<CandidateName>,
}

/// 操作员标记文件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarksFile {
    /// 生成该文件的图片指纹，没有指纹的文件不属于任何图片
    #[serde(rename = "imagem", default, skip_serializing_if = "Option::is_none")]
    pub image_fingerprint: Option<String>,
    #[serde(rename = "pessoa", default)]
    pub entries: Vec<MarkEntry>,
}

impl MarksFile {
    /// 是否是为这张图片生成的标记
    pub fn belongs_to(&self, image_fingerprint: &str) -> bool {
        self.image_fingerprint.as_deref() == Some(image_fingerprint)
    }
}

fn default_present() -> bool {
    true
}

/// 标记文件中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkEntry {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "presente", default = "default_present")]
    pub present: bool,
    #[serde(rename = "justificado", default)]
    pub justified: bool,
    #[serde(rename = "atestado", default)]
    pub medical_note: bool,
    #[serde(rename = "pulmao", default)]
    pub overflow: bool,
}

impl MarkEntry {
    pub fn new(name: impl Into<String>, flags: AttendanceFlags) -> Self {
        Self {
            name: name.into(),
            present: flags.present,
            justified: flags.justified,
            medical_note: flags.medical_note,
            overflow: flags.overflow,
        }
    }

    pub fn flags(&self) -> AttendanceFlags {
        AttendanceFlags {
            present: self.present,
            justified: self.justified,
            medical_note: self.medical_note,
            overflow: self.overflow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceStatus;

    fn sheet(names: &[&str]) -> MarkingSheet {
        MarkingSheet::new(names.iter().map(|n| CandidateName::from(*n)).collect())
    }

    #[test]
    fn test_new_sheet_defaults_to_present() {
        let sheet = sheet(&["JOAO SILVA", "MARIA SOUZA"]);
        assert_eq!(sheet.len(), 2);
        assert!(sheet
            .records()
            .iter()
            .all(|r| r.status == AttendanceStatus::Present));
    }

    #[test]
    fn test_set_flags_unknown_name() {
        let mut sheet = sheet(&["JOAO SILVA"]);
        assert!(!sheet.set_flags(&"FULANO".into(), AttendanceFlags::default()));
        assert!(sheet.flags(&"FULANO".into()).is_none());
    }

    #[test]
    fn test_apply_marks_keeps_order_and_reports_unknown() {
        let mut sheet = sheet(&["JOAO SILVA", "MARIA SOUZA", "PEDRO ALVES"]);
        let marks = MarksFile {
            image_fingerprint: None,
            entries: vec![
                MarkEntry {
                    name: "PEDRO ALVES".to_string(),
                    present: true,
                    justified: false,
                    medical_note: false,
                    overflow: true,
                },
                MarkEntry {
                    name: "JOAO SILVA".to_string(),
                    present: false,
                    justified: true,
                    medical_note: false,
                    overflow: false,
                },
                MarkEntry::new("OUTRA PESSOA", AttendanceFlags::default()),
            ],
        };

        let applied = sheet.apply(&marks);
        assert_eq!(applied.unknown, vec!["OUTRA PESSOA".to_string()]);
        assert_eq!(applied.unmarked, vec![CandidateName::from("MARIA SOUZA")]);

        let records = sheet.records();
        let statuses: Vec<_> = records.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                AttendanceStatus::Absent,
                AttendanceStatus::Present,
                AttendanceStatus::Overflow
            ]
        );
        assert!(records[0].justified);
    }

    #[test]
    fn test_marks_file_defaults_when_fields_missing() {
        let marks: MarksFile = toml::from_str(
            r#"
[[pessoa]]
nome = "JOAO SILVA"
atestado = true
"#,
        )
        .unwrap();
        let flags = marks.entries[0].flags();
        assert!(flags.present);
        assert!(flags.medical_note);
        assert!(!flags.justified);
        assert!(!flags.overflow);
    }

    #[test]
    fn test_template_lists_every_name_in_order() {
        let sheet = sheet(&["BRUNO COSTA", "ANA LIMA"]);
        let template = sheet.to_marks_file("SHA256:abc");
        let names: Vec<_> = template.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["BRUNO COSTA", "ANA LIMA"]);
        assert!(template.entries.iter().all(|e| e.present));
        assert!(template.belongs_to("SHA256:abc"));
        assert!(!template.belongs_to("SHA256:def"));
    }

    #[test]
    fn test_file_without_fingerprint_belongs_to_no_image() {
        let marks: MarksFile = toml::from_str("[[pessoa]]\nnome = \"JOAO SILVA\"\n").unwrap();
        assert!(marks.image_fingerprint.is_none());
        assert!(!marks.belongs_to("SHA256:abc"));
    }

    #[test]
    fn test_fingerprint_written_before_entries() {
        let sheet = sheet(&["JOAO SILVA"]);
        let text = toml::to_string_pretty(&sheet.to_marks_file("SHA256:abc")).unwrap();
        let reparsed: MarksFile = toml::from_str(&text).unwrap();
        assert!(text.starts_with("imagem = "));
        assert_eq!(reparsed, sheet.to_marks_file("SHA256:abc"));
    }
}
