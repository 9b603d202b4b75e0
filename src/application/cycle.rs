//! Collection cycle status and the deadline-day cache

use crate::domain::{Deadline, DeadlineDay, MonthCycle, MonthKey};
use crate::error::Result;
use crate::infrastructure::{BlobStore, Clock, Settings, SubmissionStore};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

/// How long a loaded deadline day may be reused
pub const DEADLINE_CACHE_TTL_SECS: i64 = 300;

/// Deadline day remembered for a bounded time
#[derive(Debug, Clone)]
pub struct DeadlineDayCache {
    ttl: Duration,
    entry: Option<(DeadlineDay, DateTime<Utc>)>,
}

impl DeadlineDayCache {
    pub fn new(ttl: Duration) -> Self {
        DeadlineDayCache { ttl, entry: None }
    }

    /// Cached value when younger than the TTL, otherwise `load` again
    pub fn get_or_load<F>(&mut self, now: DateTime<Utc>, load: F) -> Result<DeadlineDay>
    where
        F: FnOnce() -> Result<DeadlineDay>,
    {
        if let Some((day, loaded_at)) = self.entry {
            let age = now - loaded_at;
            if age >= Duration::zero() && age < self.ttl {
                return Ok(day);
            }
        }

        let day = load()?;
        debug!(deadline_day = %day, "loaded deadline day");
        self.entry = Some((day, now));
        Ok(day)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl Default for DeadlineDayCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEADLINE_CACHE_TTL_SECS))
    }
}

/// Snapshot of where the collection cycle stands
#[derive(Debug, Clone, Serialize)]
pub struct CycleStatus {
    pub today: NaiveDate,
    pub deadline_day: u32,
    pub current: MonthKey,
    pub previous: MonthKey,
    pub next_deadline: Deadline,
}

impl CycleStatus {
    pub fn resolve(cycle: MonthCycle, today: NaiveDate) -> Self {
        CycleStatus {
            today,
            deadline_day: cycle.deadline_day().get(),
            current: cycle.current_collection_month(today),
            previous: cycle.previous_collection_month(today),
            next_deadline: cycle.next_deadline(today),
        }
    }
}

/// Reports and adjusts the collection cycle
pub struct CycleService<B: BlobStore, C: Clock> {
    store: SubmissionStore<B>,
    clock: C,
    cache: DeadlineDayCache,
}

impl<B: BlobStore, C: Clock> CycleService<B, C> {
    pub fn new(blob: B, clock: C) -> Self {
        CycleService {
            store: SubmissionStore::new(blob),
            clock,
            cache: DeadlineDayCache::default(),
        }
    }

    /// Month cycle using the (possibly cached) deadline day
    pub fn cycle(&mut self) -> Result<MonthCycle> {
        let store = &self.store;
        let day = self
            .cache
            .get_or_load(self.clock.now(), || Ok(store.settings()?.deadline_day))?;
        Ok(MonthCycle::new(day))
    }

    pub fn status(&mut self) -> Result<CycleStatus> {
        let cycle = self.cycle()?;
        Ok(CycleStatus::resolve(cycle, self.clock.today()))
    }

    /// Month new submissions are collected for right now
    pub fn current_collection_month(&mut self) -> Result<MonthKey> {
        let cycle = self.cycle()?;
        Ok(cycle.current_collection_month(self.clock.today()))
    }

    /// Persist a new deadline day (clamped to 1..=28)
    pub fn set_deadline_day(&mut self, day: i64) -> Result<DeadlineDay> {
        let deadline_day = DeadlineDay::clamped(day);
        let mut settings: Settings = self.store.settings()?;
        settings.deadline_day = deadline_day;
        self.store.save_settings(&settings)?;
        self.cache.invalidate();
        Ok(deadline_day)
    }
}
