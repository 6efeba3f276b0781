//! Tick-driven sampling: a single-slot TTL cache in front of a minimum-interval throttle.
//!
//! The two knobs are independent. The TTL decides how long a snapshot may be served without
//! recomputation; the throttle decides how often recomputation may be attempted at all, including
//! attempts that find no target.

use kinemeter_api::NetworkSnapshot;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What a produce attempt that yields nothing does to the cached entry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoTargetPolicy {
    /// Keep the previous snapshot around until it is replaced or invalidated.
    #[default]
    Retain,
    /// Drop the previous snapshot immediately.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheEntry {
    pub snapshot: NetworkSnapshot,
    pub expires_at_tick: i64,
}

impl CacheEntry {
    pub fn is_fresh(&self, now_tick: i64) -> bool {
        now_tick < self.expires_at_tick
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Empty,
    Fresh,
    /// Past its TTL; kept until overwritten or invalidated.
    Stale,
}

/// Owns the cached snapshot for one origin. Not shared between origins.
#[derive(Debug, Clone, Default)]
pub struct SampleScheduler {
    entry: Option<CacheEntry>,
    last_attempt_tick: Option<i64>,
    no_target: NoTargetPolicy,
}

impl SampleScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(no_target: NoTargetPolicy) -> Self {
        Self {
            no_target,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> NoTargetPolicy {
        self.no_target
    }

    pub fn set_policy(&mut self, no_target: NoTargetPolicy) {
        self.no_target = no_target;
    }

    /// Serves the cached snapshot while it is fresh, otherwise runs `produce` unless the throttle
    /// interval since the last attempt has not yet elapsed.
    pub fn sample<F>(
        &mut self,
        now_tick: i64,
        min_interval_ticks: u32,
        ttl_ticks: u32,
        produce: F,
    ) -> Option<NetworkSnapshot>
    where
        F: FnOnce() -> Option<NetworkSnapshot>,
    {
        if let Some(snapshot) = self.get(now_tick) {
            trace!(now_tick, "snapshot cache hit");
            return Some(*snapshot);
        }

        if self.is_throttled(now_tick, min_interval_ticks) {
            trace!(now_tick, min_interval_ticks, "sample throttled");
            return None;
        }

        self.last_attempt_tick = Some(now_tick);
        match produce() {
            Some(snapshot) => {
                self.entry = Some(CacheEntry {
                    snapshot,
                    expires_at_tick: now_tick.saturating_add(i64::from(ttl_ticks)),
                });
                Some(snapshot)
            }
            None => {
                if self.no_target == NoTargetPolicy::Clear {
                    self.entry = None;
                }
                None
            }
        }
    }

    fn is_throttled(&self, now_tick: i64, min_interval_ticks: u32) -> bool {
        match self.last_attempt_tick {
            // A tick counter that moved backwards (world reload) resets the throttle.
            Some(last) if now_tick >= last => {
                now_tick.saturating_sub(last) < i64::from(min_interval_ticks)
            }
            _ => false,
        }
    }

    /// The cached snapshot, only while it is within its TTL.
    pub fn get(&self, now_tick: i64) -> Option<&NetworkSnapshot> {
        self.entry
            .as_ref()
            .filter(|entry| entry.is_fresh(now_tick))
            .map(|entry| &entry.snapshot)
    }

    /// The most recent snapshot regardless of TTL, for stale-but-displayed rendering.
    pub fn latest(&self) -> Option<&NetworkSnapshot> {
        self.entry.as_ref().map(|entry| &entry.snapshot)
    }

    pub fn entry(&self) -> Option<&CacheEntry> {
        self.entry.as_ref()
    }

    pub fn last_attempt_tick(&self) -> Option<i64> {
        self.last_attempt_tick
    }

    pub fn state(&self, now_tick: i64) -> SchedulerState {
        match &self.entry {
            None => SchedulerState::Empty,
            Some(entry) if entry.is_fresh(now_tick) => SchedulerState::Fresh,
            Some(_) => SchedulerState::Stale,
        }
    }

    /// Drops the cached entry. The throttle keeps its last attempt time.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
