use log::info;

use crate::{
    agent::LineAgent, episode::EpisodeOutcome, obstacle::ObstacleRegistry, policy::ActionSource,
};

/// Summary of a finished episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    pub episode: u32,
    pub steps: u32,
    pub reward: f32,
    /// `None` if the host cut the episode short at its step limit
    pub outcome: Option<EpisodeOutcome>,
}

impl EpisodeSummary {
    pub fn truncated(&self) -> bool {
        self.outcome.is_none()
    }
}

/// Drives a [`LineAgent`] through whole episodes, the way a training harness would
#[derive(Debug, Clone, Default)]
pub struct EpisodeHost {
    max_steps: Option<u32>,
    episode: u32,
    history: Vec<EpisodeSummary>,
}

impl EpisodeHost {
    /// `max_steps` caps the length of an episode; `None` runs every episode until it terminates
    pub fn new(max_steps: Option<u32>) -> Self {
        Self {
            max_steps,
            ..Default::default()
        }
    }

    /// Number of episodes run so far
    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn history(&self) -> &[EpisodeSummary] {
        &self.history
    }

    /// Run one episode from a fresh start
    pub fn run<R, P>(&mut self, agent: &mut LineAgent<R>, policy: &mut P) -> EpisodeSummary
    where
        R: ObstacleRegistry,
        P: ActionSource + ?Sized,
    {
        self.run_with(agent, policy, |_| {})
    }

    /// Run one episode from a fresh start, calling `tick` on the obstacle registry before every step
    pub fn run_with<R, P, T>(&mut self, agent: &mut LineAgent<R>, policy: &mut P, mut tick: T) -> EpisodeSummary
    where
        R: ObstacleRegistry,
        P: ActionSource + ?Sized,
        T: FnMut(&mut R),
    {
        let mut observation = agent.begin_episode();
        let mut outcome = None;
        let mut steps = 0;

        while self.max_steps.map_or(true, |max| steps < max) {
            tick(agent.obstacles_mut());
            let action = policy.next_action(&observation);
            let t = agent.act(action);
            steps += 1;

            if t.outcome.is_some() {
                outcome = t.outcome;
                break;
            }
            observation = agent.observe();
        }

        let summary = EpisodeSummary {
            episode: self.episode,
            steps,
            reward: agent.state().reward.total(),
            outcome,
        };
        match summary.outcome {
            Some(o) => info!(
                "Episode {} ended by {:?} after {} steps, reward {:.2}",
                summary.episode, o.cause, summary.steps, summary.reward
            ),
            None => info!(
                "Episode {} truncated after {} steps, reward {:.2}",
                summary.episode, summary.steps, summary.reward
            ),
        }

        self.episode += 1;
        self.history.push(summary.clone());
        summary
    }
}
