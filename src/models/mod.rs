pub mod attendance;
pub mod marking_sheet;

pub use attendance::{AttendanceFlags, AttendanceRecord, AttendanceStatus, CandidateName};
pub use marking_sheet::{MarkEntry, MarkingSheet, MarksApplied, MarksFile};
