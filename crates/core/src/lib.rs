pub mod classify;
pub mod config;
pub mod error;
pub mod explore;
pub mod format;
pub mod logging;
pub mod origin;
pub mod probe;
pub mod scheduler;
pub mod world;

pub use classify::{ClassificationRule, ClassificationTable, NodeCategory, NodeClassifier};
pub use config::SamplingConfig;
pub use error::{KinemeterError, Result};
pub use explore::{ExplorationStats, NetworkExplorer};
pub use origin::{OriginTracker, PinnedOrigin, PointerOrigin};
pub use probe::{KineticProbe, ProbeReading, SampleOutcome};
pub use scheduler::{CacheEntry, NoTargetPolicy, SampleScheduler, SchedulerState};
pub use world::{Block, BlockGrid};
