//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, RepairAction};
pub use output::{
    format_contributors, format_cycle_status, format_repair_plan, format_section_progress,
    format_stats, format_submission_list,
};
