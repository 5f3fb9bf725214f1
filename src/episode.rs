/// Lifecycle state of an episode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EpisodeState {
    #[default]
    Running,
    Terminated,
}

impl EpisodeState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationCause {
    /// The agent tried to move past one of the bounds
    OutOfBounds,
    /// The agent touched a donut
    Collision,
}

/// Terminal signal emitted on the step that ends an episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeOutcome {
    pub cause: TerminationCause,
    /// Reward delta of the terminal step
    pub reward: f32,
    /// Cumulative reward of the whole episode, terminal reward included
    pub episode_reward: f32,
    /// Steps taken in the episode, terminal step included
    pub steps: u32,
}
