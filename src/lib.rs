//! bulletin - Community newsletter submissions and editorial review
//!
//! Collects submissions into rolling monthly collection periods, tracks the
//! editor's disposition of each one, and assembles the accepted items into
//! the newsletter text for an issue.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::BulletinError;
