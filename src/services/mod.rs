pub mod line_filter;
pub mod marks_store;
pub mod name_dedup;
pub mod report_formatter;

pub use line_filter::{filter_candidates, is_candidate_line};
pub use marks_store::{image_fingerprint, MarksStore};
pub use name_dedup::dedup_names;
pub use report_formatter::format_report;
