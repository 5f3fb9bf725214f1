use crate::{obstacle::ObstacleRegistry, util::Vec3};

/// Scans a sphere around the agent for donuts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximitySensor {
    radius: f32,
}

impl ProximitySensor {
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Check whether at least one donut lies within the sensor radius
    ///
    /// Any number of donuts in range count as a single detection.
    pub fn detect<R: ObstacleRegistry + ?Sized>(&self, center: Vec3, registry: &R) -> bool {
        registry
            .overlap(center, self.radius)
            .into_iter()
            .any(|o| o.is_donut())
    }
}
