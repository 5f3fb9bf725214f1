use log::{debug, trace, warn};
use rand::{seq::IteratorRandom, thread_rng};
use strum::{IntoEnumIterator, VariantArray};

use crate::{
    action::{interpret, Action, Movement},
    config::{ConfigError, LineAgentConfig},
    env::{DiscreteActionSpace, Environment, Report},
    episode::{EpisodeOutcome, EpisodeState, TerminationCause},
    obstacle::{ObstacleRegistry, Tag},
    reward::RewardAccumulator,
    sensor::ProximitySensor,
    util::Vec3,
};

/// What the agent perceives each step: its own position
pub type Observation = Vec3;

/// Mutable state of the agent within an episode
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub position: Vec3,
    pub reward: RewardAccumulator,
    pub status: EpisodeState,
    /// Steps taken in the current episode
    pub steps: u32,
}

impl AgentState {
    /// A fresh, running episode at `start`
    pub fn new(start: Vec3) -> Self {
        Self {
            position: start,
            reward: RewardAccumulator::default(),
            status: EpisodeState::Running,
            steps: 0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !self.status.is_running()
    }
}

/// The result of advancing an [`AgentState`] by one action
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: AgentState,
    /// Reward delta of this step
    pub reward: f32,
    /// Whether the proximity sensor fired this step
    pub nearby: bool,
    /// Set on the step that ends the episode
    pub outcome: Option<EpisodeOutcome>,
}

impl Transition {
    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether the registry must despawn every donut as a consequence of this step
    pub fn despawns(&self) -> bool {
        matches!(
            self.outcome,
            Some(EpisodeOutcome {
                cause: TerminationCause::Collision,
                ..
            })
        )
    }
}

/// Advance `state` by one `action` without side effects
///
/// The obstacle registry is only queried here; despawning after a collision is signalled through
/// [`Transition::despawns`] and left to the caller. A terminated state is returned unchanged with zero reward.
pub fn transition<R: ObstacleRegistry + ?Sized>(
    state: &AgentState,
    action: Action,
    config: &LineAgentConfig,
    obstacles: &R,
) -> Transition {
    let mut next = state.clone();
    if state.is_terminal() {
        return Transition {
            state: next,
            reward: 0.0,
            nearby: false,
            outcome: None,
        };
    }

    next.steps += 1;
    let axis = config.axis.index();
    let rewards = &config.rewards;

    let movement = interpret(action, next.position[axis], &config.bounds, config.step_size);
    let Movement::Displace(dx) = movement else {
        return terminate(next, TerminationCause::OutOfBounds, rewards.out_of_bounds, false);
    };

    let nearby = ProximitySensor::new(config.detection_radius).detect(next.position, obstacles);
    let dx = if nearby { -dx } else { dx };
    next.position[axis] = config.bounds.clamp(next.position[axis] + dx);

    if ProximitySensor::new(config.collision_radius).detect(next.position, obstacles) {
        next.position = config.start;
        return terminate(next, TerminationCause::Collision, rewards.collision, nearby);
    }

    let reward = rewards.shaped(nearby);
    next.reward.add(reward);
    Transition {
        state: next,
        reward,
        nearby,
        outcome: None,
    }
}

fn terminate(mut state: AgentState, cause: TerminationCause, reward: f32, nearby: bool) -> Transition {
    state.reward.add(reward);
    state.status = EpisodeState::Terminated;
    let outcome = EpisodeOutcome {
        cause,
        reward,
        episode_reward: state.reward.total(),
        steps: state.steps,
    };
    Transition {
        state,
        reward,
        nearby,
        outcome: Some(outcome),
    }
}

/// An agent that moves along a single axis, dodging donuts dropped by an [`ObstacleRegistry`]
///
/// ### Rewards
/// - `+0.1` for every step that does not end the episode
/// - `-0.2` on a surviving step if a donut is within the detection radius, which also reverses the movement
/// - `-1.0` for trying to leave the bounds, ending the episode without moving
/// - `-0.5` for touching a donut, ending the episode after despawning all donuts and returning to the start
pub struct LineAgent<R: ObstacleRegistry> {
    config: LineAgentConfig,
    state: AgentState,
    obstacles: R,
    pub report: Report,
}

impl<R: ObstacleRegistry> LineAgent<R> {
    /// Create an agent in a running episode at the configured start
    ///
    /// **Errors** if the configuration is invalid
    pub fn new(config: LineAgentConfig, obstacles: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: AgentState::new(config.start),
            config,
            obstacles,
            report: Report::new(vec!["steps", "reward", "collisions", "out_of_bounds"]),
        })
    }

    pub fn config(&self) -> &LineAgentConfig {
        &self.config
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn obstacles(&self) -> &R {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut R {
        &mut self.obstacles
    }

    pub fn observe(&self) -> Observation {
        self.state.position
    }

    /// Start a new episode: back to the start position with a cleared reward
    pub fn begin_episode(&mut self) -> Observation {
        self.state = AgentState::new(self.config.start);
        self.observe()
    }

    /// Apply one action, including the despawn side effect of a collision
    pub fn act(&mut self, action: Action) -> Transition {
        if self.state.is_terminal() {
            warn!("Ignoring {action:?}: episode is terminated, begin a new episode first");
        }

        let t = transition(&self.state, action, &self.config, &self.obstacles);
        if t.despawns() {
            let removed = self.obstacles.despawn(&Tag::Donut);
            trace!("Despawned {removed} donuts after collision");
        }

        if self.state.status.is_running() {
            self.record(&t);
        }
        self.state = t.state.clone();
        t
    }

    fn record(&mut self, t: &Transition) {
        self.report.entry("steps").and_modify(|x| *x += 1.0);
        self.report.entry("reward").and_modify(|x| *x += t.reward as f64);

        match t.outcome {
            Some(outcome) => {
                let key = match outcome.cause {
                    TerminationCause::OutOfBounds => "out_of_bounds",
                    TerminationCause::Collision => "collisions",
                };
                self.report.entry(key).and_modify(|x| *x += 1.0);
                debug!(
                    "Episode terminated by {:?} after {} steps with reward {:.2}",
                    outcome.cause, outcome.steps, outcome.episode_reward
                );
            }
            None if t.nearby => debug!("Donut nearby at {:?}, reversing", t.state.position),
            None => {}
        }
    }
}

impl<R: ObstacleRegistry> Environment for LineAgent<R> {
    type State = Observation;
    type Action = Action;

    fn is_active(&self) -> bool {
        self.state.status.is_running()
    }

    fn random_action(&self) -> Self::Action {
        Action::iter()
            .choose(&mut thread_rng())
            .unwrap_or(Action::Nothing)
    }

    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f32) {
        let t = self.act(action);
        let next_state = (!t.is_done() && self.is_active()).then(|| self.observe());
        (next_state, t.reward)
    }

    fn reset(&mut self) -> Self::State {
        self.begin_episode()
    }
}

impl<R: ObstacleRegistry> DiscreteActionSpace for LineAgent<R> {
    fn actions(&self) -> Vec<Self::Action> {
        Action::VARIANTS.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Axis,
        obstacle::{Obstacle, Spawner, SpawnerConfig},
    };

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn agent(obstacles: Vec<Obstacle>) -> LineAgent<Vec<Obstacle>> {
        LineAgent::new(LineAgentConfig::default(), obstacles).unwrap()
    }

    fn at(x: f32) -> AgentState {
        AgentState::new([x, 0.0, 0.0])
    }

    #[test]
    fn moves_one_step_when_clear() {
        let config = LineAgentConfig::default();
        let world = Vec::new();
        for x in [-18.0, -3.5, 0.0, 7.0, 18.0] {
            let t = transition(&at(x), Action::Left, &config, &world);
            assert_eq!(t.state.position[0], x - 1.0, "Left moves one step from {x}");
            let t = transition(&at(x), Action::Right, &config, &world);
            assert_eq!(t.state.position[0], x + 1.0, "Right moves one step from {x}");
            assert!(!t.is_done());
            assert_eq!(t.reward, 0.1, "Survival bonus");
        }

        let t = transition(&at(4.0), Action::Nothing, &config, &world);
        assert_eq!(t.state.position[0], 4.0, "Nothing stays put");
    }

    #[test]
    fn three_rights() {
        let mut agent = agent(Vec::new());
        for _ in 0..3 {
            agent.act(Action::Right);
        }

        let state = agent.state();
        assert_eq!(state.position, [3.0, 0.0, 0.0], "Moved three steps right");
        assert!(approx(state.reward.total(), 0.3), "Three survival bonuses");
        assert_eq!(state.status, EpisodeState::Running, "Still running");
        assert_eq!(state.steps, 3);
    }

    #[test]
    fn out_of_bounds_terminates() {
        let config = LineAgentConfig::default();
        let world = Vec::new();

        let t = transition(&at(19.0), Action::Right, &config, &world);
        assert_eq!(t.reward, -1.0, "Out of bounds penalty only");
        assert_eq!(t.state.position[0], 19.0, "No movement applied");
        assert_eq!(t.state.status, EpisodeState::Terminated);
        let outcome = t.outcome.unwrap();
        assert_eq!(outcome.cause, TerminationCause::OutOfBounds);
        assert!(!t.despawns(), "Out of bounds leaves donuts alone");

        let t = transition(&at(-19.0), Action::Left, &config, &world);
        assert_eq!(t.state.position[0], -19.0);
        assert!(t.is_done());
    }

    #[test]
    fn nearby_donut_reverses() {
        let config = LineAgentConfig::default();
        let world = vec![Obstacle::donut([0.0, 4.0, 0.0])];

        let t = transition(&at(0.0), Action::Right, &config, &world);
        assert_eq!(t.state.position[0], -1.0, "Movement inverted");
        assert!(t.nearby);
        assert!(approx(t.reward, 0.1 - 0.2), "Proximity penalty with survival bonus");
        assert!(!t.is_done());

        let world = vec![
            Obstacle::donut([0.0, 4.0, 0.0]),
            Obstacle::donut([0.0, 3.0, 0.0]),
            Obstacle::donut([0.0, 2.0, 0.0]),
        ];
        let t = transition(&at(0.0), Action::Left, &config, &world);
        assert_eq!(t.state.position[0], 1.0);
        assert!(approx(t.reward, -0.1), "At most one proximity penalty per step");
    }

    #[test]
    fn reversal_stays_in_bounds() {
        let config = LineAgentConfig::default();
        let world = vec![Obstacle::donut([-19.0, 3.0, 0.0])];

        let t = transition(&at(-19.0), Action::Right, &config, &world);
        assert_eq!(t.state.position[0], -19.0, "Reversed movement clamped to the bound");
        assert!(!t.is_done());
    }

    #[test]
    fn collision_resets_and_despawns() {
        let mut agent = agent(vec![
            Obstacle::donut([10.0, 20.0, 0.0]),
            Obstacle {
                position: [15.0, 0.0, 0.0],
                tag: Tag::Other(String::from("ground")),
            },
        ]);
        agent.act(Action::Right);
        agent.act(Action::Right);
        assert_eq!(agent.state().position[0], 2.0);

        agent.obstacles_mut().push(Obstacle::donut([2.5, 0.5, 0.0]));
        let t = agent.act(Action::Nothing);
        assert_eq!(t.reward, -0.5, "Collision penalty only");
        assert!(approx(agent.state().reward.total(), 0.2 - 0.5));
        assert_eq!(agent.observe(), [0.0; 3], "Back at start");
        assert!(!agent.is_active(), "Episode terminated");
        assert_eq!(t.outcome.unwrap().cause, TerminationCause::Collision);
        assert_eq!(agent.obstacles().len(), 1, "All donuts removed");
        assert_eq!(agent.report["collisions"], 1.0);
    }

    #[test]
    fn terminated_step_is_noop() {
        let config = LineAgentConfig {
            start: [19.0, 0.0, 0.0],
            ..Default::default()
        };
        let mut agent = LineAgent::new(config, Vec::new()).unwrap();
        let (next, reward) = agent.step(Action::Right);
        assert_eq!(next, None);
        assert_eq!(reward, -1.0);

        let snapshot = agent.state().clone();
        let (next, reward) = agent.step(Action::Left);
        assert_eq!((next, reward), (None, 0.0), "Nothing happens once terminated");
        assert_eq!(agent.state(), &snapshot);
        assert_eq!(agent.report["steps"], 1.0, "Ignored steps are not counted");

        let obs = agent.reset();
        assert_eq!(obs, [19.0, 0.0, 0.0], "Reset returns to start");
        assert!(agent.is_active());
        assert_eq!(agent.state().reward.total(), 0.0, "Reward cleared");
        assert_eq!(agent.state().steps, 0);
    }

    #[test]
    fn other_axis() {
        let config = LineAgentConfig {
            axis: Axis::Z,
            ..Default::default()
        };
        let mut agent = LineAgent::new(config, Vec::new()).unwrap();
        let (next, _) = agent.step(Action::Left);
        assert_eq!(next, Some([0.0, 0.0, -1.0]), "Moves along z");
    }

    #[test]
    fn with_spawner() {
        let mut spawner = Spawner::new(SpawnerConfig::default()).unwrap();
        spawner.spawn([5.0, 0.0, 0.0]);
        let mut agent = LineAgent::new(LineAgentConfig::default(), spawner).unwrap();

        let (next, reward) = agent.step(Action::Right);
        assert_eq!(next, Some([-1.0, 0.0, 0.0]), "Reversed away from the donut");
        assert!(approx(reward, -0.1));

        agent.obstacles_mut().spawn([-1.5, 0.0, 0.0]);
        let (next, reward) = agent.step(Action::Nothing);
        assert_eq!((next, reward), (None, -0.5), "Hit by the donut");
        assert!(agent.obstacles().is_empty());
    }

    #[test]
    fn action_space() {
        let agent = agent(Vec::new());
        assert_eq!(agent.actions(), [Action::Left, Action::Nothing, Action::Right]);
        assert!(agent.actions().contains(&agent.random_action()));
    }

    #[test]
    fn invalid_config() {
        let config = LineAgentConfig {
            step_size: f32::INFINITY,
            ..Default::default()
        };
        assert!(LineAgent::new(config, Vec::new()).is_err());
    }
}
