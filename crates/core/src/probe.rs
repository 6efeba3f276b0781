//! Per-tick query glue: origin selection, throttled sampling and exploration in one value.

use crate::classify::NodeClassifier;
use crate::config::SamplingConfig;
use crate::explore::NetworkExplorer;
use crate::scheduler::{SampleScheduler, SchedulerState};
use kinemeter_api::{NetworkSnapshot, OriginSelector, SpatialLookup};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Served from the cache without exploring.
    Cached,
    /// A new exploration ran and produced a snapshot.
    Fresh,
    /// Throttled, disabled, or no origin this tick.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReading {
    pub outcome: SampleOutcome,
    pub snapshot: Option<NetworkSnapshot>,
    /// RPM of the origin the served snapshot was explored from.
    pub speed: Option<f32>,
}

/// Drives estimation for a single tracked origin. Hosts tracking several origins keep one probe
/// per origin.
#[derive(Debug, Clone)]
pub struct KineticProbe {
    config: SamplingConfig,
    explorer: NetworkExplorer,
    scheduler: SampleScheduler,
    origin_speed: Option<f32>,
    enabled: bool,
}

impl KineticProbe {
    pub fn new(config: SamplingConfig) -> Self {
        let config = config.validated();
        Self {
            explorer: NetworkExplorer::new(NodeClassifier::new(config.classification.clone())),
            scheduler: SampleScheduler::with_policy(config.no_target),
            config,
            origin_speed: None,
            enabled: true,
        }
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &SampleScheduler {
        &self.scheduler
    }

    pub fn tick(
        &mut self,
        now_tick: i64,
        lookup: &dyn SpatialLookup,
        selector: &dyn OriginSelector,
    ) -> Option<NetworkSnapshot> {
        self.poll(now_tick, lookup, selector).snapshot
    }

    pub fn poll(
        &mut self,
        now_tick: i64,
        lookup: &dyn SpatialLookup,
        selector: &dyn OriginSelector,
    ) -> ProbeReading {
        if !self.enabled {
            return ProbeReading {
                outcome: SampleOutcome::Idle,
                snapshot: None,
                speed: None,
            };
        }

        let was_fresh = self.scheduler.state(now_tick) == SchedulerState::Fresh;
        let budget = self.config.budget();
        let explorer = &self.explorer;
        let mut sampled_speed = None;
        let snapshot = self.scheduler.sample(
            now_tick,
            self.config.sample_every_ticks,
            self.config.cache_ttl_ticks,
            || {
                let origin = selector.resolve(lookup)?;
                sampled_speed = Some(origin.speed);
                Some(explorer.explore(&origin, budget, lookup))
            },
        );

        if sampled_speed.is_some() {
            self.origin_speed = sampled_speed;
        } else if self.scheduler.latest().is_none() {
            self.origin_speed = None;
        }

        let outcome = match (&snapshot, was_fresh) {
            (Some(_), true) => SampleOutcome::Cached,
            (Some(_), false) => SampleOutcome::Fresh,
            (None, _) => SampleOutcome::Idle,
        };
        ProbeReading {
            outcome,
            snapshot,
            speed: snapshot.and(self.origin_speed),
        }
    }

    /// Most recent snapshot even if past its TTL.
    pub fn latest(&self) -> Option<&NetworkSnapshot> {
        self.scheduler.latest()
    }

    /// RPM read from the origin when [`Self::latest`] was explored.
    pub fn origin_speed(&self) -> Option<f32> {
        self.origin_speed
    }

    /// Drops the cached snapshot, e.g. after the origin lock changes.
    pub fn invalidate(&mut self) {
        self.scheduler.invalidate();
        self.origin_speed = None;
    }

    /// Applies new tunables. A changed rule table or budget discards the cached snapshot since it
    /// was computed under the old settings.
    pub fn reconfigure(&mut self, config: SamplingConfig) {
        let config = config.validated();
        let rules_changed = config.classification != self.config.classification;
        let budget_changed = config.max_bfs_nodes != self.config.max_bfs_nodes;

        if rules_changed {
            self.explorer = NetworkExplorer::new(NodeClassifier::new(config.classification.clone()));
        }
        if rules_changed || budget_changed {
            debug!("Probe reconfigured, invalidating cached snapshot");
            self.invalidate();
        }
        self.scheduler.set_policy(config.no_target);
        self.config = config;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Flips the enabled flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

impl Default for KineticProbe {
    fn default() -> Self {
        Self::new(SamplingConfig::default())
    }
}
