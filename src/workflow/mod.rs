pub mod attendance_flow;

pub use attendance_flow::{generate_report, names_from_text, AttendanceFlow};
