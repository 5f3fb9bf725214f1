use crate::{config::ConfigError, episode::TerminationCause, util::check};

/// Reward magnitudes used to shape the agent's behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct RewardConfig {
    /// Granted on every step that does not end the episode
    pub survival: f32,
    /// Added on a surviving step when a donut is within the detection radius
    pub proximity: f32,
    pub out_of_bounds: f32,
    pub collision: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            survival: 0.1,
            proximity: -0.2,
            out_of_bounds: -1.0,
            collision: -0.5,
        }
    }
}

impl RewardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("survival", self.survival),
            ("proximity", self.proximity),
            ("out_of_bounds", self.out_of_bounds),
            ("collision", self.collision),
        ] {
            check(value, |_| true, ConfigError::invalid(name, value))?;
        }
        Ok(())
    }

    /// Reward for a step that keeps the episode running
    pub fn shaped(&self, nearby: bool) -> f32 {
        if nearby {
            self.survival + self.proximity
        } else {
            self.survival
        }
    }

    /// One-shot reward for the step that ends the episode
    pub fn terminal(&self, cause: TerminationCause) -> f32 {
        match cause {
            TerminationCause::OutOfBounds => self.out_of_bounds,
            TerminationCause::Collision => self.collision,
        }
    }
}

/// Sums rewards over the course of an episode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardAccumulator {
    total: f32,
    last: f32,
}

impl RewardAccumulator {
    pub fn add(&mut self, delta: f32) {
        self.total += delta;
        self.last = delta;
    }

    /// Cumulative reward of the current episode
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Reward delta of the most recent step
    pub fn last(&self) -> f32 {
        self.last
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
