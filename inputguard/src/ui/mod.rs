// inputguard/src/ui/mod.rs
//! Terminal presentation: status messages, diffs and tables.

pub mod diff_viewer;
pub mod output_format;
pub mod stage_table;
