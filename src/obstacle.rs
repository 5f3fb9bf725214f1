use rand::Rng;

use crate::{
    action::Bounds,
    config::{Axis, ConfigError},
    util::{check, within_radius, Vec3},
};

/// Label attached to world entities, used to tell obstacles apart from everything else
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Donut,
    Other(String),
}

/// An entity in the world that the agent can sense
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub position: Vec3,
    pub tag: Tag,
}

impl Obstacle {
    pub fn donut(position: Vec3) -> Self {
        Self {
            position,
            tag: Tag::Donut,
        }
    }

    pub fn is_donut(&self) -> bool {
        self.tag == Tag::Donut
    }
}

/// The collaborator that owns the obstacles in the world
///
/// The agent only reads from the registry, apart from asking it to despawn obstacles after a collision.
pub trait ObstacleRegistry {
    /// All entities whose position lies inside the closed sphere at `center`
    fn overlap(&self, center: Vec3, radius: f32) -> Vec<&Obstacle>;

    /// Remove every entity carrying `tag`
    ///
    /// **Returns** the number of entities removed
    fn despawn(&mut self, tag: &Tag) -> usize;
}

impl ObstacleRegistry for Vec<Obstacle> {
    fn overlap(&self, center: Vec3, radius: f32) -> Vec<&Obstacle> {
        self.iter()
            .filter(|o| within_radius(center, o.position, radius))
            .collect()
    }

    fn despawn(&mut self, tag: &Tag) -> usize {
        let before = self.len();
        self.retain(|o| &o.tag != tag);
        before - self.len()
    }
}

/// Configuration for the [`Spawner`]
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnerConfig {
    /// Spawn point; its free-axis coordinate is replaced by a random one
    pub origin: Vec3,
    pub axis: Axis,
    /// Range of free-axis coordinates donuts spawn in
    pub span: Bounds,
    /// Speed at which donuts fall along the y axis, in units per second
    pub fall_speed: f32,
    /// Donuts falling below this height are dropped
    pub floor: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            origin: [0.0, 20.0, 0.0],
            axis: Axis::X,
            span: Bounds::new(-19.0, 19.0),
            fall_speed: 5.0,
            floor: -1.0,
        }
    }
}

impl SpawnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Bounds { left, right } = self.span;
        if !(left.is_finite() && right.is_finite() && left <= right) {
            return Err(ConfigError::Bounds { left, right });
        }
        check(self.fall_speed, |v| v > 0.0, ConfigError::invalid("fall_speed", self.fall_speed))?;
        check(self.floor, |_| true, ConfigError::invalid("floor", self.floor))
    }
}

/// An in-memory [`ObstacleRegistry`] that drops donuts from above
#[derive(Debug, Clone)]
pub struct Spawner {
    config: SpawnerConfig,
    obstacles: Vec<Obstacle>,
}

impl Spawner {
    pub fn new(config: SpawnerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            obstacles: Vec::new(),
        })
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// Add any entity to the world
    pub fn insert(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Spawn a donut at an exact position
    pub fn spawn(&mut self, position: Vec3) {
        self.insert(Obstacle::donut(position));
    }

    /// Spawn a donut at the origin height, at a uniformly random point of the span
    ///
    /// **Returns** the spawn position
    pub fn spawn_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec3 {
        let Bounds { left, right } = self.config.span;
        let mut position = self.config.origin;
        position[self.config.axis.index()] = rng.gen_range(left..=right);
        self.spawn(position);
        position
    }

    /// Let donuts fall for `dt` seconds, dropping those that pass the floor
    ///
    /// **Returns** the number of donuts dropped
    pub fn advance(&mut self, dt: f32) -> usize {
        let SpawnerConfig {
            fall_speed, floor, ..
        } = self.config;

        let before = self.obstacles.len();
        for obstacle in self.obstacles.iter_mut().filter(|o| o.is_donut()) {
            obstacle.position[1] -= fall_speed * dt;
        }
        self.obstacles
            .retain(|o| !o.is_donut() || o.position[1] >= floor);
        before - self.obstacles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl ObstacleRegistry for Spawner {
    fn overlap(&self, center: Vec3, radius: f32) -> Vec<&Obstacle> {
        self.obstacles.overlap(center, radius)
    }

    fn despawn(&mut self, tag: &Tag) -> usize {
        self.obstacles.despawn(tag)
    }
}
