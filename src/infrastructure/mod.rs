//! Infrastructure layer - External I/O and persistence

pub mod blob;
pub mod clock;
pub mod config;
pub mod logging;
pub mod repository;
pub mod store;

pub use blob::{BlobStore, MemoryBlobStore};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AccessRole, Config, Secrets};
pub use repository::{FileSystemRepository, NewsletterRepository};
pub use store::{Settings, SubmissionStore};
