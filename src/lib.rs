/// Discrete actions and their interpretation as movement
pub mod action;

/// The agent: state, pure step function, and the stateful environment wrapper
pub mod agent;

/// Agent configuration and validation
pub mod config;

/// Environment traits
pub mod env;

/// Episode lifecycle and termination outcomes
pub mod episode;

/// Episode driver
pub mod host;

/// Obstacles and the registries that own them
pub mod obstacle;

/// Action sources
pub mod policy;

/// Reward shaping
pub mod reward;

/// Proximity sensing
pub mod sensor;

mod util;

pub use action::{Action, Bounds};
pub use agent::{LineAgent, Observation, Transition};
pub use config::{Axis, ConfigError, LineAgentConfig};
pub use episode::{EpisodeOutcome, EpisodeState, TerminationCause};
pub use obstacle::{Obstacle, ObstacleRegistry, Spawner, SpawnerConfig, Tag};
pub use util::Vec3;
