//! Domain layer - Business logic and domain models

pub mod assembler;
pub mod category;
pub mod cycle;
pub mod disposition;
pub mod engine;
pub mod month;
pub mod submission;

pub use assembler::{build_draft, export_newsletter_text};
pub use category::{Category, CategoryKind};
pub use cycle::{Deadline, DeadlineDay, MonthCycle};
pub use disposition::Disposition;
pub use engine::{is_relevant, DispositionEngine};
pub use month::MonthKey;
pub use submission::{SectionProgress, Submission};
