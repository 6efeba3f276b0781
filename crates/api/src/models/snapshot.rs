use super::util::non_negative;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Estimated demand (`load`) and supply (`capacity`) of a single node.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, JsonSchema)]
pub struct Contribution {
    pub load: f64,
    pub capacity: f64,
}

impl Contribution {
    /// Structurally present but inert, e.g. a shaft or cogwheel.
    pub const INERT: Contribution = Contribution {
        load: 0.0,
        capacity: 0.0,
    };

    pub fn new(load: f64, capacity: f64) -> Self {
        Self {
            load: non_negative(load),
            capacity: non_negative(capacity),
        }
    }

    pub fn consumer(load: f64) -> Self {
        Self::new(load, 0.0)
    }

    pub fn generator(capacity: f64) -> Self {
        Self::new(0.0, capacity)
    }
}

/// Aggregated result of one network exploration.
///
/// Every snapshot is an estimate: `approximate` is always `true`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, JsonSchema)]
pub struct NetworkSnapshot {
    pub load_total: f64,
    pub capacity_total: f64,
    pub node_count: u32,
    pub approximate: bool,
}

impl NetworkSnapshot {
    /// Result for an origin that resolves to no node.
    pub fn empty() -> Self {
        Self {
            load_total: 0.0,
            capacity_total: 0.0,
            node_count: 0,
            approximate: true,
        }
    }

    /// Folds one node into the running totals.
    pub fn accumulate(&mut self, contribution: Contribution) {
        self.load_total += non_negative(contribution.load);
        self.capacity_total += non_negative(contribution.capacity);
        self.node_count = self.node_count.saturating_add(1);
    }

    /// `load / capacity`, or `0` when there is no capacity.
    pub fn ratio(&self) -> f64 {
        if self.capacity_total > 0.0 {
            self.load_total / self.capacity_total
        } else {
            0.0
        }
    }

    pub fn is_overloaded(&self) -> bool {
        self.capacity_total > 0.0 && self.load_total > self.capacity_total
    }

    /// Remaining capacity; negative when overloaded.
    pub fn headroom(&self) -> f64 {
        self.capacity_total - self.load_total
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }
}

impl Default for NetworkSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Upper bound on how many nodes a single exploration may visit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub struct ExplorationBudget {
    pub max_nodes: u32,
}

impl ExplorationBudget {
    pub const DEFAULT_MAX_NODES: u32 = 2048;

    /// A budget of zero is raised to one so the origin is always counted.
    pub fn new(max_nodes: u32) -> Self {
        Self {
            max_nodes: max_nodes.max(1),
        }
    }
}

impl Default for ExplorationBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_NODES)
    }
}
