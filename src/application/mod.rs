//! Application layer - Use cases and orchestration

pub mod cycle;
pub mod export;
pub mod init;
pub mod manage_config;
pub mod repair;
pub mod review;
pub mod sections;
pub mod submit;

pub use cycle::{CycleService, CycleStatus, DeadlineDayCache};
pub use export::{ExportBundle, ExportService, ImportSummary};
pub use repair::{RepairPlan, RepairReport, RepairService};
pub use review::ReviewService;
pub use sections::SectionService;
pub use submit::SubmitService;
