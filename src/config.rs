use crate::{action::Bounds, reward::RewardConfig, util::check, util::Vec3};

/// Invalid configuration, detected when an agent or spawner is constructed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("bounds must satisfy left < right, got [{left}, {right}]")]
    Bounds { left: f32, right: f32 },

    #[error("start coordinate {0} lies outside the bounds")]
    StartOutOfBounds(f32),

    #[error("invalid value for `{name}`: {value}")]
    Invalid { name: &'static str, value: f32 },

    #[error("collision radius {collision} exceeds detection radius {detection}")]
    CollisionRadius { collision: f32, detection: f32 },
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, value: f32) -> impl FnOnce() -> Self {
        move || Self::Invalid { name, value }
    }
}

/// The world axis the agent is free to move along
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Configuration for the [`LineAgent`](crate::agent::LineAgent)
#[derive(Debug, Clone, PartialEq)]
pub struct LineAgentConfig {
    /// Position the agent returns to at episode begin and after a collision
    pub start: Vec3,
    pub axis: Axis,
    pub bounds: Bounds,
    /// Distance moved by a single `Left` or `Right` action
    pub step_size: f32,
    /// Radius in which nearby donuts reverse the agent's movement
    pub detection_radius: f32,
    /// Radius in which a donut counts as hitting the agent
    pub collision_radius: f32,
    pub rewards: RewardConfig,
}

impl Default for LineAgentConfig {
    fn default() -> Self {
        Self {
            start: [0.0; 3],
            axis: Axis::X,
            bounds: Bounds::new(-19.0, 19.0),
            step_size: 1.0,
            detection_radius: 5.0,
            collision_radius: 1.0,
            rewards: RewardConfig::default(),
        }
    }
}

impl LineAgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Bounds { left, right } = self.bounds;
        if !(left.is_finite() && right.is_finite() && left < right) {
            return Err(ConfigError::Bounds { left, right });
        }

        let x = self.start[self.axis.index()];
        if !self.bounds.contains(x) {
            return Err(ConfigError::StartOutOfBounds(x));
        }

        check(self.step_size, |v| v > 0.0, ConfigError::invalid("step_size", self.step_size))?;
        check(
            self.detection_radius,
            |v| v >= 0.0,
            ConfigError::invalid("detection_radius", self.detection_radius),
        )?;
        check(
            self.collision_radius,
            |v| v >= 0.0,
            ConfigError::invalid("collision_radius", self.collision_radius),
        )?;
        if self.collision_radius > self.detection_radius {
            return Err(ConfigError::CollisionRadius {
                collision: self.collision_radius,
                detection: self.detection_radius,
            });
        }

        self.rewards.validate()
    }
}
